//! Recordings decode back into the events they captured.

use std::io::Write;

use chrono::{DateTime, TimeZone, Utc};
use kqstats_stream::{
    decode_at, read_recording, record_line, DecodeStats, RecordingError, RecordingReader, Replay,
    StatKind,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const CAPTURE: &str = "\
1518063130441,![k[playernames],v[,,,,,,,,,]]!
1518063130451,![k[playerKill],v[730,860,9,8]]!

1518063130461,![k[playerKill],v[770,860,9,10]]!\r
1518063130471,![k[playerKill],v[810,860,9,4]]!
1518063130481,![k[playerKill],v[1071.977,20,3,10]]!
";

#[tokio::test]
async fn reader_skips_blank_lines_and_keeps_order() {
    let file = write_fixture(CAPTURE);
    let mut reader = RecordingReader::open(file.path()).await.unwrap();

    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await.unwrap() {
        lines.push(line);
    }
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("1518063130441,"));
    assert_eq!(lines[2], "1518063130461,![k[playerKill],v[770,860,9,10]]!");
}

#[tokio::test]
async fn recorded_lines_decode_with_their_receive_time() {
    let file = write_fixture(CAPTURE);
    let lines = read_recording(file.path()).await.unwrap();

    let mut stats = DecodeStats::new();
    let mut replay = Replay::new(lines);
    let mut first = None;
    while let Some(line) = replay.next_line() {
        let result = decode_at(line, now());
        if first.is_none() {
            first = result.as_ref().ok().map(|e| e.timestamp());
        }
        stats.record(&result);
    }

    assert_eq!(first, DateTime::from_timestamp_millis(1_518_063_130_441));
    assert_eq!(stats.decoded.get(&StatKind::PlayerKill), Some(&4));
    assert_eq!(stats.decoded.get(&StatKind::PlayerNames), Some(&1));
    assert_eq!(stats.total_rejected(), 0);
}

#[tokio::test]
async fn empty_recording_is_an_error() {
    let file = write_fixture("\n\n");
    let err = read_recording(file.path()).await.unwrap_err();
    assert!(matches!(err, RecordingError::Empty(_)));
}

#[tokio::test]
async fn missing_recording_is_io_error() {
    let err = read_recording("/definitely/not/here.log").await.unwrap_err();
    assert!(matches!(err, RecordingError::Io(_)));
}

#[test]
fn record_then_decode_preserves_receive_time() {
    let received = Utc.timestamp_millis_opt(1_540_058_877_411).unwrap();
    let line = record_line(received, "![k[berryDeposit],v[900,50,3]]!");
    let event = decode_at(&line, now()).unwrap();
    assert_eq!(event.timestamp(), received);
    assert_eq!(event.kind(), StatKind::BerryDeposit);
}
