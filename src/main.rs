//! Eth OScape entry point
//!
//! Headless native runner: loads settings and the level, starts a session and
//! drives it one step per frame until it ends or the frame cap is hit.
//!
//! Usage: `eth-oscape [--settings <file.json>] [--dump-level]`

use std::path::PathBuf;
use std::process::ExitCode;

use eth_oscape::Settings;
use eth_oscape::consts::FRAME_HZ;
use eth_oscape::runner::Game;
use eth_oscape::sim::{Session, SessionResult};

struct Args {
    settings: Option<PathBuf>,
    dump_level: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        settings: None,
        dump_level: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => {
                let path = iter.next().ok_or("--settings needs a path")?;
                args.settings = Some(PathBuf::from(path));
            }
            "--dump-level" => args.dump_level = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\nusage: eth-oscape [--settings <file.json>] [--dump-level]");
            return ExitCode::from(2);
        }
    };

    let settings = Settings::load(args.settings.as_deref());

    let level = match settings.level() {
        Ok(level) => level,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.dump_level {
        return match level.to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Eth OScape (native) starting: level '{}', seed {}", level.name, seed);

    let session = Session::new(level, settings.tuning, seed);
    let mut game = Game::new(session, settings.input_source());
    game.start();

    let mut frames = 0;
    while frames < settings.max_frames && game.frame().is_some() {
        frames += 1;
        if frames % u64::from(FRAME_HZ) == 0 {
            let view = game.view();
            log::debug!(
                "frame {}: x={:.1} y={:.1} camera={:.1} {}",
                frames,
                view.player().pos.x,
                view.player().pos.y,
                view.camera_x(),
                view.hud_text()
            );
        }
    }

    match game.result() {
        Some(SessionResult::Won { score, code }) => {
            println!("Welcome to the club! Total points: {score}");
            println!("Your completion code: {code}");
        }
        Some(SessionResult::Lost {
            score,
            cause,
            collected_all,
        }) => {
            log::info!("Lost: {cause:?}");
            println!("Game Over! Score: {score}");
            if collected_all {
                println!("You collected all coins but didn't reach the club!");
            } else {
                println!("Avoid the fire, pits, and zombies!");
            }
        }
        None => {
            game.cancel();
            println!(
                "Stopped after {frames} frames. {}",
                game.view().hud_text()
            );
        }
    }

    ExitCode::SUCCESS
}
