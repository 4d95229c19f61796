use std::fs;
use std::thread;

use tempfile::TempDir;
use tempsim::channels::{self, ChannelSet};
use tempsim::config::IpcConfig;
use tempsim::ipc::SensorFile;
use tempsim::models::{Reading, Temperature};
use tempsim::simulator::SensorWindow;

fn ipc_config(dir: &TempDir) -> IpcConfig {
    IpcConfig {
        directory: dir.path().to_string_lossy().into_owned(),
        prefix: "wiringPiSPI".to_string(),
    }
}

#[test]
fn concurrent_writers_never_leave_partial_readings() {
    let dir = TempDir::new().unwrap();
    let config = ipc_config(&dir);
    let sensor = SensorFile::for_channel(&config, 0);
    sensor
        .write(&Reading::from_temperature(Temperature::default()))
        .unwrap();

    // Readings of different text lengths, so an interleaved write would show.
    let values = [100, 135, 400, 250];
    let expected: Vec<Reading> = values
        .iter()
        .map(|&t| Reading::from_temperature(Temperature::from_tenths(t)))
        .chain(std::iter::once(Reading::from_temperature(Temperature::default())))
        .collect();

    thread::scope(|scope| {
        for &tenths in &values {
            let sensor = sensor.clone();
            scope.spawn(move || {
                let reading = Reading::from_temperature(Temperature::from_tenths(tenths));
                for _ in 0..200 {
                    sensor.write(&reading).unwrap();
                }
            });
        }

        let sensor = sensor.clone();
        let expected = &expected;
        scope.spawn(move || {
            for _ in 0..500 {
                let reading = sensor.read().unwrap();
                assert!(expected.contains(&reading), "unexpected reading {}", reading);
            }
        });
    });

    let last = sensor.read().unwrap();
    assert!(expected.contains(&last));
}

#[test]
fn windows_publish_and_cleanup_removes_files() {
    let dir = TempDir::new().unwrap();
    let config = ipc_config(&dir);
    let channels = ChannelSet::from_args([0, 1]);

    let mut windows: Vec<SensorWindow> = channels
        .sensor_files(&config)
        .into_iter()
        .map(|sensor| SensorWindow::new(sensor).unwrap())
        .collect();

    windows[1]
        .set_temperature(Temperature::from_tenths(400))
        .unwrap();

    assert_eq!(
        fs::read_to_string(config.channel_path(0)).unwrap(),
        "6 0 248"
    );
    assert_eq!(
        fs::read_to_string(config.channel_path(1)).unwrap(),
        "6 1 240"
    );

    assert_eq!(channels::cleanup(&config, &channels), 0);
    assert!(!config.channel_path(0).exists());
    assert!(!config.channel_path(1).exists());
}

#[test]
fn reader_decodes_what_the_window_wrote() {
    let dir = TempDir::new().unwrap();
    let config = ipc_config(&dir);
    let mut window = SensorWindow::new(SensorFile::for_channel(&config, 5)).unwrap();

    window.set_temperature(Temperature::from_tenths(315)).unwrap();

    let reading = SensorFile::for_channel(&config, 5).read().unwrap();
    assert!(reading.is_temperature());
    assert!((reading.degrees() - 31.5).abs() < 0.1);
}
