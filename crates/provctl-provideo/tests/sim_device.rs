mod common;

use std::time::{Duration, Instant};

use common::sim::SimDevice;
use provctl_channel::{ControlChannel, OpenConfig};
use provctl_protocol::{
    ControlProtocol, DeviceFailure, DpcPixel, DpcTable, ErrorKind, FeatureId, KneeConfig,
    MccPhase, ProtocolError, ZebraConfig,
};
use provctl_provideo::{register_all, DriverConfig, DriverOptions, ProVideo};

fn quick_config() -> DriverConfig {
    DriverConfig {
        timeout: Duration::from_millis(500),
        slow_timeout: Duration::from_millis(1000),
        poll_interval: Duration::from_millis(1),
        ..DriverConfig::default()
    }
}

fn session(
    device: &SimDevice,
    chunk: usize,
    options: DriverOptions,
) -> (ControlProtocol, ControlChannel) {
    let mut protocol = ControlProtocol::new();
    register_all(&mut protocol, quick_config(), options).unwrap();
    let mut channel = ControlChannel::with_transport(device.transport(chunk));
    channel.open(&OpenConfig::default()).unwrap();
    (protocol, channel)
}

#[test]
fn scalar_round_trips() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());

    for gain in [0, 1, 512, 1023] {
        protocol.set_cam_gain(&mut ch, gain).unwrap();
        assert_eq!(protocol.get_cam_gain(&mut ch).unwrap(), gain);
    }
    for brightness in [-127, -1, 0, 127] {
        protocol.set_brightness(&mut ch, brightness).unwrap();
        assert_eq!(protocol.get_brightness(&mut ch).unwrap(), brightness);
    }
    protocol.set_lens_focus(&mut ch, -42_000).unwrap();
    assert_eq!(protocol.get_lens_focus(&mut ch).unwrap(), -42_000);
}

#[test]
fn record_round_trips() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 2, DriverOptions::default());

    let knee = KneeConfig {
        enable: 1,
        knee_point: 5,
        knee_slope: 320,
        white_clip: 105,
    };
    protocol.set_knee_config(&mut ch, &knee).unwrap();
    assert_eq!(protocol.get_knee_config(&mut ch).unwrap(), knee);

    let zebra = ZebraConfig {
        mode: 2,
        min: 800,
        max: 1000,
    };
    protocol.set_zebra(&mut ch, &zebra).unwrap();
    assert_eq!(protocol.get_zebra(&mut ch).unwrap(), zebra);

    let phase = MccPhase {
        id: 7,
        saturation: 1400,
        hue: -25,
    };
    protocol.set_mcc_phase(&mut ch, &phase).unwrap();
    assert_eq!(protocol.get_mcc_phase(&mut ch, 7).unwrap(), phase);
}

#[test]
fn read_only_records() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 1, DriverOptions::default());

    let version = protocol.get_version(&mut ch).unwrap();
    assert_eq!(version.to_string(), "1.4.2");
    let info = protocol.get_cam_info(&mut ch).unwrap();
    assert_eq!((info.min_gain, info.max_gain), (0, 1023));
    assert_eq!(protocol.get_temperature(&mut ch).unwrap().max, 70);
    assert_eq!(protocol.get_runtime(&mut ch).unwrap(), 86_400);
}

#[test]
fn out_of_range_leaves_previous_value() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());

    protocol.set_cam_gain(&mut ch, 120).unwrap();
    let err = protocol.set_cam_gain(&mut ch, 1600).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert!(matches!(
        err,
        ProtocolError::Device {
            failure: DeviceFailure::OutOfRange,
            ..
        }
    ));
    assert_eq!(protocol.get_cam_gain(&mut ch).unwrap(), 120);
    assert_eq!(device.value("cam_gain"), vec![120]);
}

#[test]
fn device_failures_through_raw_lines() {
    let device = SimDevice::new();
    let (_protocol, mut ch) = session(&device, 3, DriverOptions::default());
    let driver = ProVideo::with_config(quick_config());
    let timeout = Duration::from_millis(500);

    let err = driver.transact_raw(&mut ch, "cam_gain 1 2", timeout).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParamCount);

    let err = driver.transact_raw(&mut ch, "warp_drive 9", timeout).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FirmwareUnsupported);

    let text = driver.transact_raw(&mut ch, "temp", timeout).unwrap();
    assert_eq!(text, "temp 41 70\n");
}

#[test]
fn all_chains_flag_reaches_the_wire() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::all_chains());

    protocol.set_brightness(&mut ch, 10).unwrap();
    protocol.set_cam_gain(&mut ch, 99).unwrap();

    let received = device.received();
    assert!(received.contains(&"cproc_bright 10 1".to_string()));
    assert!(received.contains(&"cam_gain 99".to_string()));
    assert_eq!(device.value("cproc_bright"), vec![10]);
}

#[test]
fn features_can_use_different_contexts() {
    let device = SimDevice::new();
    let mut protocol = ControlProtocol::new();
    let driver = ProVideo::with_config(quick_config());
    driver
        .with_options(DriverOptions::all_chains())
        .register(&mut protocol, &[FeatureId::Cproc])
        .unwrap();
    driver.register(&mut protocol, &[FeatureId::Knee]).unwrap();

    let mut ch = ControlChannel::with_transport(device.transport(3));
    ch.open(&OpenConfig::default()).unwrap();
    protocol.set_hue(&mut ch, -3).unwrap();
    protocol
        .set_knee_config(&mut ch, &KneeConfig::default())
        .unwrap();

    assert_eq!(device.received(), vec!["cproc_hue -3 1", "knee 0 0 0 0"]);
    let err = protocol.get_cam_gain(&mut ch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSupported);
}

#[test]
fn silent_device_is_desync_within_deadline() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());
    device.set_silent(true);

    let started = Instant::now();
    let err = protocol.get_cam_gain(&mut ch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Desync);
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert!(started.elapsed() < Duration::from_secs(5));

    device.set_silent(false);
    assert_eq!(protocol.get_cam_gain(&mut ch).unwrap(), 100);
}

#[test]
fn defect_pixels_read_back_in_insertion_order() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());

    let pixels = [
        DpcPixel { x: 640, y: 360 },
        DpcPixel { x: 1, y: 1079 },
        DpcPixel { x: 1919, y: 0 },
    ];
    protocol.clear_dpc_table(&mut ch).unwrap();
    for pixel in &pixels {
        protocol.add_dpc_pixel(&mut ch, pixel).unwrap();
    }

    let mut table = DpcTable::with_capacity(8);
    protocol.get_dpc_table(&mut ch, &mut table).unwrap();
    assert_eq!(table.pixels(), &pixels);
}

#[test]
fn defect_table_capacity_is_never_exceeded() {
    let device = SimDevice::new();
    device.set_dpc_capacity(4);
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());

    let mut table = DpcTable::with_capacity(3);
    for i in 0..3 {
        table.push(DpcPixel { x: i, y: i * 2 }).unwrap();
    }
    assert_eq!(
        table.push(DpcPixel { x: 9, y: 9 }).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    protocol.set_dpc_table(&mut ch, &table).unwrap();
    assert_eq!(device.dpc_pixels(), vec![(0, 0), (1, 2), (2, 4)]);

    protocol
        .add_dpc_pixel(&mut ch, &DpcPixel { x: 5, y: 5 })
        .unwrap();
    let err = protocol
        .add_dpc_pixel(&mut ch, &DpcPixel { x: 6, y: 6 })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeviceFailure);

    let mut small = DpcTable::with_capacity(2);
    protocol.get_dpc_table(&mut ch, &mut small).unwrap();
    assert_eq!(small.len(), 2);
    assert_eq!(small.pixels()[1], DpcPixel { x: 1, y: 2 });
}

#[test]
fn registry_calls_need_an_open_channel() {
    let device = SimDevice::new();
    let mut protocol = ControlProtocol::new();
    register_all(&mut protocol, quick_config(), DriverOptions::default()).unwrap();

    let mut ch = ControlChannel::with_transport(device.transport(3));
    let err = protocol.get_cam_gain(&mut ch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(device.received().is_empty());
}

#[test]
fn settings_persistence_actions() {
    let device = SimDevice::new();
    let (protocol, mut ch) = session(&device, 3, DriverOptions::default());
    protocol.save_settings(&mut ch).unwrap();
    protocol.save_dpc_table(&mut ch).unwrap();
    protocol.set_fan_speed(&mut ch, 80).unwrap();
    assert_eq!(protocol.get_fan_speed(&mut ch).unwrap(), 80);
    assert_eq!(
        device.received(),
        vec!["save_settings", "dpc_save", "fan 80", "fan"]
    );
}
