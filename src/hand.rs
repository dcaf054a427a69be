// Hand landmark estimation.
//
// The estimator itself (MediaPipe's hand landmarker) runs in a child process. We hand it
// one frame at a time over stdin and read back one JSON line per frame:
//
//   stdin:  width:u32le height:u32le channels:u32le  then width*height*channels RGB bytes
//   stdout: {"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":..,"y":..,"z":..}, ...]}]}
//
// The process prints a single `READY` line once its model is loaded.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;

use crate::error::Error;
use crate::gesture::HandPose;
use crate::types::{FrameBuffer, Point};

/// Hand landmark indices (MediaPipe hand landmark model convention).
#[allow(dead_code)]
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    pub const COUNT: usize = 21;
}

/// Bones of the hand skeleton, as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),       // thumb
    (0, 5), (5, 6), (6, 7), (7, 8),       // index
    (5, 9), (9, 10), (10, 11), (11, 12),  // middle
    (9, 13), (13, 14), (14, 15), (15, 16), // ring
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20), // pinky + palm
];

/// A single hand landmark. `x`/`y` are normalised to the frame, `z` is depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    /// Scale into frame pixels, truncating toward zero.
    pub fn to_pixel(self, width: usize, height: usize) -> Point {
        Point::new((self.x * width as f32) as i32, (self.y * height as f32) as i32)
    }
}

#[derive(Clone, Debug)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; landmarks::COUNT],
    pub confidence: f32,
    pub handedness: String,
}

impl HandLandmarks {
    /// Index fingertip and thumb tip in frame pixels.
    pub fn pose(&self, width: usize, height: usize) -> HandPose {
        HandPose {
            fingertip: self.landmarks[landmarks::INDEX_FINGER_TIP].to_pixel(width, height),
            thumb_tip: self.landmarks[landmarks::THUMB_TIP].to_pixel(width, height),
        }
    }

    /// All landmarks in frame pixels, for the skeleton overlay.
    pub fn pixels(&self, width: usize, height: usize) -> [Point; landmarks::COUNT] {
        self.landmarks.map(|lm| lm.to_pixel(width, height))
    }
}

/// Anything that can find (at most) one hand in a frame.
pub trait Estimator {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error>;
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score: f32,
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one response line. Returns the first hand scoring at least `min_confidence`
/// that carries a full landmark set.
pub fn parse_detection(line: &str, min_confidence: f32) -> Result<Option<HandLandmarks>, Error> {
    let result: DetectionResult = serde_json::from_str(line.trim())
        .map_err(|e| Error::Estimator(format!("bad response {:?}: {e}", line.trim())))?;

    if let Some(error) = result.error {
        log::warn!("landmark process reported: {error}");
        return Ok(None);
    }

    for hand in result.hands {
        if hand.score < min_confidence {
            continue;
        }
        let Ok(points) = <[Landmark; landmarks::COUNT]>::try_from(hand.landmarks.as_slice()) else {
            log::warn!("expected {} landmarks, got {}", landmarks::COUNT, hand.landmarks.len());
            continue;
        };
        return Ok(Some(HandLandmarks {
            landmarks: points,
            confidence: hand.score,
            handedness: hand.handedness,
        }));
    }

    Ok(None)
}

/// MediaPipe (or anything speaking the same protocol) in a child process.
pub struct SubprocessEstimator {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    min_confidence: f32,
}

const SETUP_HINT: &str = "python3 -m venv .venv && .venv/bin/pip install mediapipe numpy";

impl SubprocessEstimator {
    /// Start the process and block until it prints `READY`.
    pub fn spawn(program: &str, args: &[String], min_confidence: f32) -> Result<Self, Error> {
        if let Some(script) = args.iter().find(|a| a.ends_with(".py")) {
            if !Path::new(script).exists() {
                return Err(Error::Estimator(format!(
                    "landmark script {script:?} not found (run from the repo root or set [estimator] args)"
                )));
            }
        }

        log::info!("starting landmark process: {program} {}", args.join(" "));

        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Estimator(format!("spawn {program}: {e}. Set up with: {SETUP_HINT}")))?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            let _ = process.kill();
            let _ = process.wait();
            return Err(Error::Estimator("child pipes unavailable".into()));
        };
        let mut stdout = BufReader::new(stdout);

        if let Err(e) = wait_ready(&mut stdout) {
            let _ = process.kill();
            let _ = process.wait();
            return Err(e);
        }

        log::info!("landmark process ready");
        Ok(Self { process, stdin, stdout, min_confidence })
    }
}

fn wait_ready(stdout: &mut impl BufRead) -> Result<(), Error> {
    let mut ready = String::new();
    stdout
        .read_line(&mut ready)
        .map_err(|e| Error::Estimator(format!("waiting for READY: {e}")))?;
    if ready.trim() != "READY" {
        return Err(Error::Estimator(format!("expected READY, got {:?}", ready.trim())));
    }
    Ok(())
}

impl Estimator for SubprocessEstimator {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Option<HandLandmarks>, Error> {
        if frame.pixels.is_empty() {
            return Ok(None);
        }

        let io = |e: std::io::Error| Error::Estimator(format!("landmark process I/O: {e}"));

        self.stdin.write_all(&(frame.width as u32).to_le_bytes()).map_err(io)?;
        self.stdin.write_all(&(frame.height as u32).to_le_bytes()).map_err(io)?;
        self.stdin.write_all(&3u32.to_le_bytes()).map_err(io)?;
        self.stdin.write_all(&frame.to_rgb_bytes()).map_err(io)?;
        self.stdin.flush().map_err(io)?;

        let mut line = String::new();
        let n = self.stdout.read_line(&mut line).map_err(io)?;
        if n == 0 {
            return Err(Error::Estimator("landmark process exited".into()));
        }

        let hand = parse_detection(&line, self.min_confidence)?;
        if let Some(h) = &hand {
            log::debug!("hand: {} ({:.2})", h.handedness, h.confidence);
        }
        Ok(hand)
    }
}

impl Drop for SubprocessEstimator {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(score: f32, count: usize) -> String {
        let lms: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, i as f32 / 40.0))
            .collect();
        format!(r#"{{"handedness":"Right","score":{score},"landmarks":[{}]}}"#, lms.join(","))
    }

    #[test]
    fn picks_first_confident_hand() {
        let line = format!(r#"{{"hands":[{},{}]}}"#, hand_json(0.3, 21), hand_json(0.9, 21));
        let hand = parse_detection(&line, 0.7).unwrap().unwrap();
        assert_eq!(hand.confidence, 0.9);
        assert_eq!(hand.handedness, "Right");
    }

    #[test]
    fn no_hands_is_none() {
        assert!(parse_detection(r#"{"hands":[]}"#, 0.7).unwrap().is_none());
        assert!(parse_detection("{}\n", 0.7).unwrap().is_none());
    }

    #[test]
    fn reported_error_is_none() {
        let line = r#"{"hands":[],"error":"decode failed"}"#;
        assert!(parse_detection(line, 0.7).unwrap().is_none());
    }

    #[test]
    fn short_landmark_set_is_skipped() {
        let line = format!(r#"{{"hands":[{}]}}"#, hand_json(0.95, 20));
        assert!(parse_detection(&line, 0.7).unwrap().is_none());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(parse_detection("not json", 0.7), Err(Error::Estimator(_))));
    }

    #[test]
    fn pixels_truncate() {
        let lm = Landmark { x: 0.4999, y: 0.999, z: 0.0 };
        assert_eq!(lm.to_pixel(640, 480), Point::new(319, 479));
    }

    #[test]
    fn pose_uses_index_and_thumb_tips() {
        let mut points = [Landmark::default(); landmarks::COUNT];
        points[landmarks::INDEX_FINGER_TIP] = Landmark { x: 0.5, y: 0.5, z: 0.0 };
        points[landmarks::THUMB_TIP] = Landmark { x: 0.25, y: 0.75, z: 0.0 };
        let hand = HandLandmarks { landmarks: points, confidence: 1.0, handedness: "Left".into() };
        let pose = hand.pose(640, 480);
        assert_eq!(pose.fingertip, Point::new(320, 240));
        assert_eq!(pose.thumb_tip, Point::new(160, 360));
        assert_eq!(hand.pixels(640, 480)[landmarks::INDEX_FINGER_TIP], Point::new(320, 240));
    }

    #[test]
    fn ready_handshake() {
        assert!(wait_ready(&mut "READY\n".as_bytes()).is_ok());
        assert!(wait_ready(&mut "".as_bytes()).is_err());
        assert!(wait_ready(&mut "Traceback (most recent call last)\n".as_bytes()).is_err());
        assert!(wait_ready(&mut &b"\xff\n"[..]).is_err());
    }

    #[test]
    fn missing_script_fails_before_spawning() {
        let args = vec!["no/such/hand_detect.py".to_owned()];
        let err = SubprocessEstimator::spawn("python3", &args, 0.7).err();
        assert!(matches!(err, Some(Error::Estimator(msg)) if msg.contains("not found")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_handshake_reaps_the_child() {
        let pid_file = std::env::temp_dir().join(format!("air-canvas-ready-{}", std::process::id()));
        // invalid UTF-8 instead of READY makes read_line itself fail
        let script = format!("echo $$ > {}; printf '\\377\\n'; sleep 30", pid_file.display());
        let args = vec!["-c".to_owned(), script];

        assert!(SubprocessEstimator::spawn("sh", &args, 0.7).is_err());
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let _ = std::fs::remove_file(&pid_file);
        assert!(!Path::new(&format!("/proc/{}", pid.trim())).exists());
    }

    #[test]
    fn connections_stay_in_range() {
        assert!(HAND_CONNECTIONS.iter().all(|&(a, b)| a < landmarks::COUNT && b < landmarks::COUNT));
    }
}
