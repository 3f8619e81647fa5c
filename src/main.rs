// What you SEE:
// • A foil-covered card. Hold Left Mouse and drag to scratch it off.
// • The prize underneath shows through wherever you scratched.
// • HUD shows how much of the card is revealed, plus FPS.
// • Past --reveal-at, the rest of the foil drops away.
// • N deals a fresh card. ESC quits.

mod app_error;
mod compose;
mod draw;
mod gamma;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;

use app_error::AppError;
use compose::{FrameBuffer, foil_cover, gradient_prize, load_frame, load_seed, reveal_through_mask};
use draw::{Drawer, draw_crosshair, draw_text_5x7, text_width};
use gamma::GammaLut;
use scratch_card::{Point, PointerPath, ScratchConfig, ScratchObserver};

#[derive(Parser)]
#[command(version, about = "Scratch-off card demo")]
struct Cli {
    /// Card width in pixels
    #[arg(long, default_value_t = 480)]
    width: u32,

    /// Card height in pixels
    #[arg(long, default_value_t = 320)]
    height: u32,

    /// Brush diameter in pixels (0 = hairline)
    #[arg(long, default_value_t = 36.0)]
    stroke_width: f32,

    /// Image shown underneath the foil
    #[arg(long, value_name = "PATH")]
    prize: Option<PathBuf>,

    /// Image used as the foil
    #[arg(long, value_name = "PATH")]
    cover: Option<PathBuf>,

    /// Grayscale mask of already-scratched areas
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Reveal the whole prize once this fraction is scratched
    #[arg(long, default_value_t = 0.6, value_parser = parse_fraction)]
    reveal_at: f64,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("not a number: {e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is outside 0..=1"))
    }
}

/// Logs each scratch callback.
struct LogObserver;

impl ScratchObserver for LogObserver {
    fn began(&self, path: &PointerPath) {
        info!("scratch began at {:?}", path.current_position());
    }

    fn ended(&self, path: &PointerPath) {
        info!(
            "scratch ended at {:?}, revealed {:.1}%",
            path.current_position(),
            path.ratio() * 100.0
        );
    }
}

fn new_card(cli: &Cli) -> Result<PointerPath, AppError> {
    let config = ScratchConfig::new(cli.width, cli.height, cli.stroke_width);
    let mut card = match &cli.seed {
        Some(path) => {
            let seed = load_seed(path, cli.width, cli.height)?;
            PointerPath::with_seed(config, &seed)?
        }
        None => PointerPath::new(config)?,
    };
    card.add_observer(LogObserver);
    Ok(card)
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let cli = Cli::parse();

    /* --- Engine first: a bad size fails here, before any window opens --- */
    let mut card = new_card(&cli)?;
    let (w, h) = (cli.width as usize, cli.height as usize);

    /* --- Cover + prize images (files if given, procedural otherwise) --- */
    let cover = match &cli.cover {
        Some(path) => load_frame(path, cli.width, cli.height)?,
        None => foil_cover(w, h),
    };
    let mut prize = match &cli.prize {
        Some(path) => load_frame(path, cli.width, cli.height)?,
        None => gradient_prize(w, h),
    };
    if cli.prize.is_none() {
        let caption = "YOU WIN!";
        let scale = (cli.width as i32 / 80).max(1);
        let x = (cli.width as i32 - text_width(caption, scale)) / 2;
        let y = (cli.height as i32 - 7 * scale) / 2;
        draw_text_5x7(&mut prize, x, y, caption, 0x00_FF_FF_FF, scale);
    }

    let mut drawer = Drawer::new("Scratch Card", w, h)?;
    let mut screen = FrameBuffer::new(w, h);
    let lut = GammaLut::new();

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut was_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        if drawer.n_pressed_once() {
            card = new_card(&cli)?;
            was_down = false;
        }

        /* 1) Mouse -> pointer path. minifb has no press/release events, so
              edges of the button state stand in for begin/end. */
        let down = drawer.left_mouse_down();
        if let Some((mx, my)) = drawer.mouse_pos() {
            let p = Point::new(mx, my);
            match (was_down, down) {
                (false, true) => card.begin(p),
                (true, true) if p != card.current_position() => card.move_to(p),
                (true, false) => card.end(p),
                _ => {}
            }
        } else if was_down && !down {
            let last = card.current_position();
            card.end(last);
        }
        was_down = down;

        /* 2) Composite: foil where covered, prize where scratched. */
        let ratio = card.ratio();
        if ratio >= cli.reveal_at {
            screen.pixels.copy_from_slice(&prize.pixels);
        } else {
            reveal_through_mask(&mut screen, &cover, &prize, &card.export_mask(), &lut)?;
        }

        /* 3) Crosshair + HUD */
        if let Some((mx, my)) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, mx as i32, my as i32, 12, 0x00_FF_CC_33);
        }
        let hud = format!(
            "REVEALED: {:.1}% | {} | LMB SCRATCH  N NEW  ESC QUIT",
            ratio * 100.0,
            hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF, 1);

        /* 4) Present */
        drawer.present(&screen)?;

        /* 5) FPS counter, once per second */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
