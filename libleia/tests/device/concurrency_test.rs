#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;

use libleia::test_support::script_response;

#[test]
fn shared_reader_serialises_commands() {
    const THREADS: usize = 8;

    let (reader, mock) = common::helpers::attached_reader().unwrap();
    for _ in 0..THREADS {
        script_response(&mock, &[1]);
    }

    let reader = Arc::new(reader);
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || reader.is_card_inserted())
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap().unwrap());
    }
    assert_eq!(mock.pending_responses(), 0);
    // Each exchange is a probe followed by a whole frame, never interleaved
    let sent = common::helpers::sent_after_handshake(&mock);
    assert_eq!(sent, b" ?\0\0\0\0".repeat(THREADS));
}
