use libleia::transport::{Channel, ChannelSettings, MockChannel, MockDiscovery, PortDiscovery, PortInfo};

#[test]
fn clones_share_state() {
    let mock = MockChannel::new();
    let mut boxed: Box<dyn Channel> = Box::new(mock.clone());
    mock.push_response(vec![b'W']);

    boxed.write(b" ").unwrap();
    assert_eq!(boxed.read(1).unwrap(), vec![b'W']);
    assert_eq!(mock.sent_bytes(), b" ".to_vec());
    assert_eq!(mock.pending_responses(), 0);

    boxed.close().unwrap();
    assert!(mock.is_closed());
    assert!(!boxed.is_open());
}

#[test]
fn reads_time_out_with_partial_data() {
    let mut mock = MockChannel::new();
    mock.push_response(vec![1, 2]);
    mock.write(&[0]).unwrap();
    assert_eq!(mock.read(4).unwrap(), vec![1, 2]);
    assert!(mock.read(1).unwrap().is_empty());
}

#[test]
fn discovery_lists_and_opens() {
    let ports = vec![
        PortInfo::usb("/dev/ttyACM0", 0x3483, 0x0BB9),
        PortInfo::new("/dev/ttyS0", None, None),
    ];
    let d = MockDiscovery::new(ports.clone(), MockChannel::new());
    assert_eq!(d.list_ports().unwrap(), ports);
    assert!(ports[0].matches(0x3483, 0x0BB9));
    assert!(!ports[1].matches(0x3483, 0x0BB9));

    let settings = ChannelSettings::default();
    let ch = d.open(&ports[0], &settings).unwrap();
    assert_eq!(ch.name(), "mock");
    assert_eq!(d.opened(), vec![("/dev/ttyACM0".to_string(), settings)]);
}
