// What you SEE:
// • "Air Canvas - Camera": the mirrored camera feed with your hand skeleton, a cursor dot
//   in the current colour, the button strip and everything drawn so far.
// • "Air Canvas - Paint": the same drawing on white paper.
// • Point with your index finger to draw. Pinch thumb and index together to lift the pen.
// • Touch a colour button to switch colour, CLEAR to wipe everything.
// • SPACE pauses/resumes. ESC quits.

mod buttons;
mod camera;
mod config;
mod draw;
mod error;
mod geometry;
mod gesture;
mod hand;
mod palette;
mod render;
mod session;
mod strokes;
mod types;
mod window;

use std::env;
use std::time::{Duration, Instant};

use camera::CameraCapture;
use config::Config;
use error::Error;
use gesture::GestureInterpreter;
use hand::{Estimator, SubprocessEstimator};
use render::Overlay;
use session::Session;
use window::Drawer;

fn main() -> Result<(), Error> {
    env_logger::builder()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match &*env::args_os().skip(1).collect::<Vec<_>>() {
        [] => {
            log::info!("no config given, using defaults");
            Config::default()
        }
        [path] => {
            log::info!("loading config from {}", path.to_string_lossy());
            Config::load(path)?
        }
        _ => {
            return Err(Error::Config(format!(
                "usage: {} [config.toml]",
                env!("CARGO_PKG_NAME")
            )));
        }
    };

    /* --- Camera, landmark process, windows --- */
    let cam_cfg = &config.camera;
    let mut cam = CameraCapture::new(cam_cfg.index, cam_cfg.width, cam_cfg.height, cam_cfg.mirror)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    log::info!("camera open at {w}x{h}");

    let est_cfg = &config.estimator;
    let mut estimator =
        SubprocessEstimator::spawn(&est_cfg.program, &est_cfg.args, est_cfg.min_confidence)?;

    let mut live_window = Drawer::new("Air Canvas - Camera", w, h)?;
    let mut paint_window = Drawer::new("Air Canvas - Paint", w, h)?;

    /* --- Drawing state --- */
    let interpreter =
        GestureInterpreter::new(config.gesture.pinch_threshold, config.gesture.out_of_frame);
    let mut session = Session::new(w, h);
    let mut live = session.canvas().clone();

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut paused = false;

    /* ------------------------------ Main loop ------------------------------ */
    while live_window.is_open() && paint_window.is_open() && !live_window.esc_pressed() {
        if live_window.space_pressed_once() || paint_window.space_pressed_once() {
            paused = !paused;
            log::info!("{}", if paused { "paused" } else { "resumed" });
            if paused {
                render::render_hud(&mut live, h, "PAUSED");
            }
        }

        if paused {
            // Keep the windows responsive; nothing is consumed or changed.
            live_window.present(&live)?;
            paint_window.present(session.canvas())?;
            std::thread::sleep(Duration::from_millis(30));
            continue;
        }

        /* 1) Frame + landmarks */
        live = cam.next_frame()?;
        let hand = estimator.detect(&live)?;

        /* 2) Interpret the gesture and update strokes/colour/canvas */
        let pose = hand.as_ref().map(|hl| hl.pose(w, h));
        let gesture = interpreter.step(&mut session, pose);

        /* 3) Draw both surfaces */
        let skeleton = hand.as_ref().map(|hl| hl.pixels(w, h));
        render::render_overlay(
            &mut live,
            &session,
            &Overlay {
                hand: skeleton.as_ref(),
                highlight: gesture.highlight(),
                hud: &hud_fps_text,
            },
        );
        render::render_canvas(&mut session);

        /* 4) Present */
        live_window.present(&live)?;
        paint_window.present(session.canvas())?;

        /* 5) FPS once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::info!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
