//! Full driver scenarios against a scripted controller.

use std::time::Duration;

use mountlib_core::{Axis, Error, LinkState, Mount, MountEvent, Position};
use mountlib_nexstar::NexStarBuilder;
use mountlib_test_harness::MockTransport;

/// A controller that answers the echo probe and acknowledges everything else.
fn cooperative_controller() -> MockTransport {
    let mut mock = MockTransport::new();
    mock.expect(&[0x4B, 0x45], &[0x45, 0x23]);
    mock.set_default_response(b"#");
    mock
}

#[tokio::test]
async fn slew_fixed_transmits_expected_frame() {
    let mock = cooperative_controller();
    let sent = mock.sent_log();

    let mount = NexStarBuilder::new()
        .build_with_transport(Box::new(mock))
        .await
        .unwrap();
    mount.slew_fixed(Axis::Altitude, -40).await.unwrap();

    assert_eq!(
        sent.frames(),
        vec![vec![0x4B, 0x45], vec![0x50, 2, 17, 37, 40, 0, 0]]
    );
}

#[tokio::test]
async fn tracking_session() {
    let mut mock = MockTransport::new();
    mock.expect(&[0x4B, 0x45], &[0x45, 0x23]);
    mock.expect(b"Z", b"4000,2000#");
    mock.expect(&[0x50, 3, 17, 6, 0x00, 0x3C, 0], b"#");
    mock.expect(&[0x50, 3, 16, 7, 0x01, 0x90, 0], b"#");
    mock.expect(b"Z", b"4010,2008#");
    mock.expect(&[0x50, 3, 17, 6, 0, 0, 0], b"#");
    mock.expect(&[0x50, 3, 16, 6, 0, 0, 0], b"#");

    let mount = NexStarBuilder::new()
        .serial_port("/dev/ttyUSB0")
        .command_timeout(Duration::from_millis(200))
        .build_with_transport(Box::new(mock))
        .await
        .unwrap();
    let mut events = mount.subscribe().unwrap();

    let start = mount.get_position().await.unwrap();
    assert_eq!(start.to_degrees(), (90.0, 45.0));

    mount.set_slew_rate(15, -100).await.unwrap();

    let next = mount.get_position().await.unwrap();
    assert_eq!(
        next,
        Position {
            azimuth: 0x4010,
            altitude: 0x2008
        }
    );

    mount.stop_all().await.unwrap();
    mount.close().await.unwrap();
    assert_eq!(mount.link_state().await, LinkState::Closed);

    // position, two slews, position, two stops, disconnect
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.len(), 7);
    assert_eq!(seen.last(), Some(&MountEvent::Disconnected));
}

#[tokio::test]
async fn handshake_rejects_wrong_echo() {
    let mut mock = MockTransport::new();
    mock.expect(&[0x4B, 0x45], &[0x44, 0x23]);

    let result = NexStarBuilder::new()
        .build_with_transport(Box::new(mock))
        .await;
    assert!(matches!(result, Err(Error::Handshake(_))));
}

#[tokio::test]
async fn babbling_controller_times_out_then_recovers() {
    let mut mock = MockTransport::new();
    mock.expect(&[0x4B, 0x45], &[0x45, 0x23]);
    mock.expect(b"Z", &[b'0'; 100]);
    mock.expect(b"Z", b"0001,0002#");

    let mount = NexStarBuilder::new()
        .build_with_transport(Box::new(mock))
        .await
        .unwrap();

    assert!(matches!(mount.get_position().await, Err(Error::Timeout)));
    let pos = mount.get_position().await.unwrap();
    assert_eq!((pos.azimuth, pos.altitude), (1, 2));
}

#[tokio::test]
async fn out_of_range_rates_never_reach_the_wire() {
    let mock = cooperative_controller();
    let sent = mock.sent_log();
    let mount = NexStarBuilder::new()
        .build_with_transport(Box::new(mock))
        .await
        .unwrap();

    assert!(matches!(
        mount.slew_fixed(Axis::Azimuth, 256).await,
        Err(Error::Encoding(_))
    ));
    assert!(matches!(
        mount.slew_variable(Axis::Altitude, 16384).await,
        Err(Error::Encoding(_))
    ));
    assert!(matches!(
        mount.set_slew_rate(16384, 0).await,
        Err(Error::Encoding(_))
    ));
    assert_eq!(sent.frames().len(), 1);
}
