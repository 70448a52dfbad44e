use std::net::SocketAddr;
use std::sync::Arc;

use taglog_core::{Clock, LayoutRegistry, MemorySink, Session, SessionContext};

const SVIN_LINE: &str = "I (5120) gnss: DATA_TAG: NAME:UBXNavSVIN FORMAT:<B3x2I3i3bx2I2B2x LEN:13 \
BASE64:AAAAAEDiAQA8AAAAZAAAADj///8sAQAAAf4DAIgTAAAqAAAAAQAAAA==";

fn context(sink: &Arc<MemorySink>) -> SessionContext {
    SessionContext::new(
        Arc::new(LayoutRegistry::builtin().unwrap()),
        sink.clone(),
        Clock::utc(),
    )
}

fn peer() -> SocketAddr {
    "192.168.4.20:51000".parse().unwrap()
}

/// Messages without the `[timestamp][client]: ` prefix.
fn messages(sink: &MemorySink) -> Vec<String> {
    sink.lines()
        .into_iter()
        .map(|line| {
            let (prefix, message) = line.split_once("]: ").unwrap();
            assert!(prefix.starts_with('['));
            assert!(prefix.ends_with("][192.168.4.20"));
            message.to_string()
        })
        .collect()
}

fn run(chunks: &[&[u8]]) -> Vec<String> {
    let sink = Arc::new(MemorySink::new());
    let context = context(&sink);
    let mut session = Session::open(&context, peer());
    for chunk in chunks {
        session.receive(chunk);
    }
    session.close();
    messages(&sink)
}

#[test]
fn untagged_line_is_printed_verbatim() {
    let out = run(&[b"I (42) wifi: connected   \r\n"]);
    assert_eq!(
        out,
        vec![
            "Connection from 192.168.4.20",
            "I (42) wifi: connected",
            "Connection from 192.168.4.20 closed."
        ]
    );
}

#[test]
fn survey_in_frame_decodes_with_field_names() {
    let line = format!("{SVIN_LINE}\n");
    let out = run(&[line.as_bytes()]);

    assert_eq!(out[1], SVIN_LINE);
    assert_eq!(out[2], "Decoded UBXNavSVIN:");
    let fields = &out[3..16];
    assert_eq!(
        fields,
        [
            "  version: 0",
            "  iTOW: 123456",
            "  dur: 60",
            "  meanX: 100",
            "  meanY: -200",
            "  meanZ: 300",
            "  meanXHP: 1",
            "  meanYHP: -2",
            "  meanZHP: 3",
            "  meanAcc: 5000",
            "  obs: 42",
            "  valid: 1",
            "  active: 0",
        ]
    );
    assert!(out.iter().all(|line| !line.contains("[extra")));
    assert_eq!(out.len(), 17);
}

#[test]
fn unknown_struct_uses_placeholders() {
    let out = run(&[b"DATA_TAG: NAME:Foo FORMAT:<I LEN:1 BASE64:AQAAAA==\n"]);
    assert_eq!(
        out[2],
        "Decoded Foo (struct Foo is not registered, using placeholder field names):"
    );
    assert_eq!(out[3], "  field_0: 1");
}

#[test]
fn bad_frame_does_not_stop_the_connection() {
    let out = run(&[
        b"DATA_TAG: NAME:Foo FORMAT:<I LEN:1 BASE64:AQA=\n",
        b"DATA_TAG: NAME:Foo LEN:1\n",
        b"still alive\n",
    ]);
    assert_eq!(
        out[2],
        "Failed to decode Foo: payload length mismatch: format needs 4 bytes, got 2"
    );
    assert_eq!(out[4], "Could not parse DATA_TAG line: missing FORMAT field");
    assert_eq!(out[5], "still alive");
    assert_eq!(out[6], "Connection from 192.168.4.20 closed.");
}

#[test]
fn frame_split_across_reads_is_reassembled() {
    let line = format!("{SVIN_LINE}\n");
    let (head, tail) = line.as_bytes().split_at(37);
    let (mid, tail) = tail.split_at(50);
    let out = run(&[head, mid, tail]);
    assert_eq!(out[1], SVIN_LINE);
    assert_eq!(out[2], "Decoded UBXNavSVIN:");
}

#[test]
fn unterminated_frame_is_decoded_on_close() {
    let out = run(&[b"DATA_TAG: NAME:NetworkData FORMAT:<IH LEN:2 BASE64:BwAAAOQM"]);
    assert_eq!(
        out,
        vec![
            "Connection from 192.168.4.20",
            "DATA_TAG: NAME:NetworkData FORMAT:<IH LEN:2 BASE64:BwAAAOQM",
            "Decoded NetworkData:",
            "  send_count: 7",
            "  battery_voltage: 3300",
            "Connection from 192.168.4.20 closed."
        ]
    );
}

#[test]
fn huge_declared_len_does_not_stall_the_session() {
    let out = run(&[
        b"DATA_TAG: NAME:Foo FORMAT:<I LEN:4000000000 BASE64:AQAAAA==\n",
        b"next line\n",
    ]);
    assert_eq!(out[3], "  field_0: 1");
    assert_eq!(out[4], "next line");
    assert_eq!(out.len(), 6);
}
