#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::{attached_reader, sent_after_handshake};
use libleia::constants::TRIGGER_STRATEGY_SIZE;
use libleia::protocol::CommandFrame;
use libleia::test_support::{reply_with_payload, script_ack, script_raw, script_response};
use libleia::{Error, ErrorKind, Protocol};

#[test]
fn card_presence() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[1]);
    script_response(&mock, &[0]);

    assert!(reader.is_card_inserted().unwrap());
    assert!(!reader.is_card_inserted().unwrap());

    let sent = sent_after_handshake(&mock);
    assert_eq!(sent, b" ?\0\0\0\0 ?\0\0\0\0".to_vec());
}

#[test]
fn card_presence_with_wrong_size() {
    for payload in [&[][..], &[1, 1][..]] {
        let (reader, mock) = attached_reader().unwrap();
        script_response(&mock, payload);
        let err = reader.is_card_inserted().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedResponseSize { command: '?', .. }
        ));
        assert_eq!(err.kind(), ErrorKind::Framing);
    }
}

#[test]
fn configure_without_card() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[0]);

    let err = reader.configure(None, 0, 0, true, true).unwrap_err();
    assert!(matches!(err, Error::CardNotInserted));
    assert_eq!(err.kind(), ErrorKind::Precondition);
    // No configure frame was sent
    assert!(!sent_after_handshake(&mock).contains(&b'c'));
}

#[test]
fn configure_defaults_to_t1() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[1]);
    script_ack(&mock);

    reader.configure(None, 0, 0, true, true).unwrap();

    let sent = sent_after_handshake(&mock);
    // " ?0000" then " c" frame
    let frame = CommandFrame::decode(&sent[7..]).unwrap();
    assert_eq!(frame.id, b'c');
    assert_eq!(frame.payload, vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
}

#[test]
fn configure_explicit_parameters() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[1]);
    script_ack(&mock);

    reader
        .configure(Some(Protocol::T0), 372, 4_000_000, false, true)
        .unwrap();

    let sent = sent_after_handshake(&mock);
    let frame = CommandFrame::decode(&sent[7..]).unwrap();
    let mut expected = vec![0];
    expected.extend_from_slice(&372u32.to_le_bytes());
    expected.extend_from_slice(&4_000_000u32.to_le_bytes());
    expected.extend_from_slice(&[0, 1]);
    assert_eq!(frame.payload, expected);
}

#[test]
fn configure_failure_is_wrapped() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[1]);
    script_raw(&mock, vec![b'E']);

    let err = reader.configure(None, 0, 0, true, true).unwrap_err();
    match &err {
        Error::Configure { source } => assert!(matches!(**source, Error::DeviceError)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Device);
}

#[test]
fn get_atr() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &fixtures::sample_atr_bytes());

    let atr = reader.get_atr().unwrap();
    assert_eq!(atr, fixtures::sample_atr());
    assert_eq!(atr.protocol(), Some(Protocol::T1));
    assert_eq!(atr.frequency_khz(), 4000);
}

#[test]
fn get_atr_with_short_answer() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[0u8; 54]);

    let err = reader.get_atr().unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedResponseSize {
            command: 't',
            actual: 54,
            ..
        }
    ));
}

#[test]
fn trigger_strategies() {
    let (reader, mock) = attached_reader().unwrap();
    script_ack(&mock);
    script_ack(&mock);

    reader.reset_trigger_strategy().unwrap();
    reader.set_pre_send_apdu_trigger_strategy().unwrap();

    let sent = sent_after_handshake(&mock);
    let frame_len = 1 + 4 + TRIGGER_STRATEGY_SIZE;
    let reset = CommandFrame::decode(&sent[1..1 + frame_len]).unwrap();
    let pre_send = CommandFrame::decode(&sent[2 + frame_len..]).unwrap();

    assert_eq!(reset.id, b'O');
    assert_eq!(reset.payload[6], 0); // no points
    assert_eq!(pre_send.payload[6], 1);
    assert_eq!(&pre_send.payload[7..11], &(1u32 << 5).to_le_bytes());
}

#[test]
fn unsupported_command() {
    let (reader, mock) = attached_reader().unwrap();
    script_raw(&mock, vec![b'U']);

    let err = reader.reset_trigger_strategy().unwrap_err();
    assert!(matches!(err, Error::Unsupported { command: 'O' }));
    assert_eq!(err.kind(), ErrorKind::Device);
    assert!(err.to_string().contains("not supported"));
}

#[test]
fn status_and_ack_failures() {
    let (reader, mock) = attached_reader().unwrap();
    script_raw(&mock, vec![b'S', 0x05]);
    assert!(matches!(
        reader.reset_trigger_strategy(),
        Err(Error::ErrorStatus(0x05))
    ));

    let (reader, mock) = attached_reader().unwrap();
    script_raw(&mock, vec![b'S', 0x00, b'X']);
    assert!(matches!(
        reader.reset_trigger_strategy(),
        Err(Error::NoAck(Some(b'X')))
    ));

    let (reader, mock) = attached_reader().unwrap();
    script_raw(&mock, vec![b'Q']);
    assert!(matches!(
        reader.reset_trigger_strategy(),
        Err(Error::InvalidStatusFlag(b'Q'))
    ));
}

#[test]
fn send_apdu_status_only() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &fixtures::status_only_response());

    let aid = fixtures::select_aid();
    let resp = reader.send_apdu(0x00, 0xA4, 0x04, 0x00, &aid).unwrap();
    assert_eq!(resp, vec![0x90, 0x00]);

    let sent = sent_after_handshake(&mock);
    let frame = CommandFrame::decode(&sent[1..]).unwrap();
    assert_eq!(frame.id, b'a');
    assert_eq!(&frame.payload[..6], &[0x00, 0xA4, 0x04, 0x00, 7, 0]);
    assert_eq!(&frame.payload[11..], aid.as_slice());
}

#[test]
fn send_apdu_with_data() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &fixtures::response_with_data(&[1, 2, 3], 0x90, 0x00));
    let resp = reader.send_apdu(0x00, 0xB0, 0x00, 0x00, &[]).unwrap();
    assert_eq!(resp, vec![1, 2, 3, 0x90, 0x00]);
}

#[test]
fn send_apdu_raw_keeps_timings() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &fixtures::response_with_data(&[], 0x6A, 0x82));
    let resp = reader.send_apdu_raw(0x00, 0xA4, 0x04, 0x00, &[]).unwrap();
    assert_eq!(resp.sw(), 0x6A82);
    assert_eq!(resp.delta_t, 120);
    assert_eq!(resp.delta_t_answer, 3400);
}

#[test]
fn send_apdu_short_response() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &[0u8; 13]);
    let err = reader.send_apdu(0x00, 0xA4, 0x04, 0x00, &[]).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedResponseSize {
            command: 'a',
            actual: 13,
            ..
        }
    ));
}

#[test]
fn send_apdu_truncates_data() {
    let (reader, mock) = attached_reader().unwrap();
    script_response(&mock, &fixtures::status_only_response());
    let data = vec![0xAB; 20_000];
    reader.send_apdu(0x00, 0xD6, 0x00, 0x00, &data).unwrap();

    let sent = sent_after_handshake(&mock);
    let frame = CommandFrame::decode(&sent[1..]).unwrap();
    assert_eq!(frame.payload.len(), 11 + 16384);
    assert_eq!(&frame.payload[4..6], &16384u16.to_le_bytes());
}

#[test]
fn wait_extensions_are_consumed() {
    let (reader, mock) = attached_reader().unwrap();
    let mut raw = b"wwww".to_vec();
    raw.extend(reply_with_payload(&[1]));
    script_raw(&mock, raw);
    assert!(reader.is_card_inserted().unwrap());
}

#[test]
fn truncated_payload_is_a_short_read() {
    let (reader, mock) = attached_reader().unwrap();
    let mut raw = reply_with_payload(&fixtures::sample_atr_bytes());
    raw.truncate(raw.len() - 5);
    script_raw(&mock, raw);

    let err = reader.get_atr().unwrap_err();
    assert!(matches!(
        err,
        Error::ShortRead {
            stage: libleia::Stage::Payload,
            expected: 55,
            actual: 50
        }
    ));
}

#[test]
fn commands_require_an_open_reader() {
    let reader = libleia::device::Reader::new(libleia::test_support::fast_config());
    assert!(matches!(reader.is_card_inserted(), Err(Error::NotConnected)));
    assert!(matches!(
        reader.send_apdu(0, 0, 0, 0, &[]),
        Err(Error::NotConnected)
    ));
}
