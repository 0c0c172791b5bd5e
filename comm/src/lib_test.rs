use super::*;

use serde_json::json;

fn state(value: Value) -> StateMap {
    match value {
        Value::Object(map) => map,
        _ => StateMap::new(),
    }
}

// =============================================================
// Encoding
// =============================================================

#[test]
fn update_encodes_with_method_tag_and_buffer_paths() {
    let message = CommMessage::update(state(json!({"mouseDown": true, "mouseButton": 1})));
    let encoded = encode_message(&message).expect("encode");
    assert_eq!(
        encoded,
        json!({
            "method": "update",
            "state": {"mouseDown": true, "mouseButton": 1},
            "buffer_paths": []
        })
    );
}

#[test]
fn request_state_encodes_as_bare_method() {
    let encoded = encode_message(&CommMessage::RequestState).expect("encode");
    assert_eq!(encoded, json!({"method": "request_state"}));
}

#[test]
fn custom_encodes_content() {
    let message = CommMessage::Custom { content: json!({"event": "reset"}) };
    let encoded = encode_message(&message).expect("encode");
    assert_eq!(encoded, json!({"method": "custom", "content": {"event": "reset"}}));
}

#[test]
fn method_names_match_wire_tags() {
    assert_eq!(CommMessage::update(StateMap::new()).method(), "update");
    assert_eq!(
        CommMessage::EchoUpdate { state: StateMap::new(), buffer_paths: Vec::new() }.method(),
        "echo_update"
    );
    assert_eq!(CommMessage::RequestState.method(), "request_state");
    assert_eq!(CommMessage::Custom { content: Value::Null }.method(), "custom");
}

// =============================================================
// Decoding
// =============================================================

#[test]
fn decode_update_without_buffer_paths_defaults_to_empty() {
    let message = decode_message(&json!({"method": "update", "state": {"value": "hi"}})).expect("decode");
    assert_eq!(message, CommMessage::update(state(json!({"value": "hi"}))));
}

#[test]
fn decode_echo_update() {
    let message = decode_message(&json!({
        "method": "echo_update",
        "state": {"mousePos": [0.5, 0.25]},
        "buffer_paths": []
    }))
    .expect("decode");
    assert_eq!(message.method(), "echo_update");
    assert_eq!(message.state().and_then(|s| s.get("mousePos")), Some(&json!([0.5, 0.25])));
}

#[test]
fn decode_buffer_paths_accept_keys_and_indices() {
    let message = decode_message(&json!({
        "method": "update",
        "state": {},
        "buffer_paths": [["frames", 2, "data"]]
    }))
    .expect("decode");
    let CommMessage::Update { buffer_paths, .. } = message else {
        panic!("expected update");
    };
    assert_eq!(
        buffer_paths,
        vec![vec![
            PathSegment::Key("frames".to_owned()),
            PathSegment::Index(2),
            PathSegment::Key("data".to_owned()),
        ]]
    );
}

#[test]
fn decode_rejects_unknown_method() {
    let err = decode_message(&json!({"method": "display"})).expect_err("unknown method");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_update_without_state() {
    let err = decode_message(&json!({"method": "update"})).expect_err("missing state");
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn state_is_none_for_non_sync_messages() {
    assert!(CommMessage::RequestState.state().is_none());
    assert!(CommMessage::Custom { content: json!(1) }.state().is_none());
}

// =============================================================
// Buffers
// =============================================================

#[test]
fn top_level_buffer_is_inlined_as_base64() {
    let data = json!({
        "method": "update",
        "state": {"imageFormat": "png"},
        "buffer_paths": [["imageData"]]
    });
    let message = decode_message_with_buffers(&data, &[b"hello".to_vec()]).expect("decode");
    let CommMessage::Update { state, buffer_paths } = message else {
        panic!("expected update");
    };
    assert!(buffer_paths.is_empty());
    assert_eq!(state.get("imageData"), Some(&json!("aGVsbG8=")));
    assert_eq!(state.get("imageFormat"), Some(&json!("png")));
}

#[test]
fn nested_buffer_replaces_placeholder_in_array() {
    let mut target = state(json!({"frames": [null, {"data": null}]}));
    let paths = vec![vec![
        PathSegment::Key("frames".to_owned()),
        PathSegment::Index(1),
        PathSegment::Key("data".to_owned()),
    ]];
    inline_buffers(&mut target, &paths, &[vec![0xff, 0x00]]).expect("inline");
    assert_eq!(target.get("frames"), Some(&json!([null, {"data": "/wA="}])));
}

#[test]
fn buffer_count_mismatch_is_rejected() {
    let data = json!({"method": "update", "state": {}, "buffer_paths": [["imageData"]]});
    let err = decode_message_with_buffers(&data, &[]).expect_err("mismatch");
    assert!(matches!(err, CodecError::BufferCountMismatch { paths: 1, buffers: 0 }));
}

#[test]
fn buffers_on_request_state_are_rejected() {
    let err = decode_message_with_buffers(&json!({"method": "request_state"}), &[vec![1]]).expect_err("mismatch");
    assert!(matches!(err, CodecError::BufferCountMismatch { paths: 0, buffers: 1 }));
}

#[test]
fn path_starting_with_index_is_invalid() {
    let mut target = StateMap::new();
    let err = inline_buffers(&mut target, &[vec![PathSegment::Index(0)]], &[vec![1]]).expect_err("invalid");
    assert!(matches!(err, CodecError::InvalidBufferPath(ref p) if p == "0"));
}

#[test]
fn path_through_missing_parent_is_invalid() {
    let mut target = StateMap::new();
    let paths = vec![vec![PathSegment::Key("frames".to_owned()), PathSegment::Index(0)]];
    let err = inline_buffers(&mut target, &paths, &[vec![1]]).expect_err("invalid");
    assert!(matches!(err, CodecError::InvalidBufferPath(ref p) if p == "frames/0"));
}

#[test]
fn index_past_end_of_array_is_invalid() {
    let mut target = state(json!({"frames": []}));
    let paths = vec![vec![PathSegment::Key("frames".to_owned()), PathSegment::Index(0)]];
    let err = inline_buffers(&mut target, &paths, &[vec![1]]).expect_err("invalid");
    assert!(matches!(err, CodecError::InvalidBufferPath(_)));
}

#[test]
fn codec_errors_display_context() {
    let err = CodecError::BufferCountMismatch { paths: 2, buffers: 1 };
    assert_eq!(err.to_string(), "message names 2 buffer paths but 1 buffers were delivered");
}
