use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use macroquad::prelude::*;

use goblin_grove::assets::load_assets;
use goblin_grove::audio::SoundBank;
use goblin_grove::render::screen::ScreenTarget;
use goblin_grove::{input, logging, AudioSink, Config, Cue, FrameOutcome, Game, Silence};

const CONFIG_PATH: &str = "settings.json";

fn window_conf() -> Conf {
    Config::load(Path::new(CONFIG_PATH))
        .unwrap_or_default()
        .window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    logging::init();
    if let Err(err) = run().await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load(Path::new(CONFIG_PATH)).context("Reading settings")?;
    prevent_quit();

    let (assets, atlas) = load_assets(&config.images_dir()).await?;

    let mut audio: Box<dyn AudioSink> = match SoundBank::load(&config.data_dir, config.music_volume).await {
        Ok(bank) => Box::new(bank),
        Err(err) => {
            tracing::warn!("audio disabled: {err:#}");
            Box::new(Silence)
        }
    };
    audio.play(Cue::Music);
    audio.play(Cue::Ambience);

    let mut game = Game::new(assets, &config).context("Loading first level")?;

    let display = config.display_size();
    let frame_buffer = render_target(config.display_width, config.display_height);
    frame_buffer.texture.set_filter(FilterMode::Nearest);
    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, display.x, display.y));
    camera.render_target = Some(frame_buffer.clone());

    let frame_budget = 1.0 / config.target_fps.max(1) as f64;

    loop {
        let started = get_time();
        let events = input::poll();

        set_camera(&camera);
        clear_background(BLACK);
        let mut target = ScreenTarget::new(&atlas, display);
        let shake = match game.frame(&events, audio.as_mut(), &mut target)? {
            FrameOutcome::Quit => break,
            FrameOutcome::Present { shake } => shake,
        };

        set_default_camera();
        clear_background(BLACK);
        draw_texture_ex(
            &frame_buffer.texture,
            shake.x,
            shake.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                flip_y: true,
                ..Default::default()
            },
        );

        let elapsed = get_time() - started;
        if elapsed < frame_budget {
            std::thread::sleep(Duration::from_secs_f64(frame_budget - elapsed));
        }
        next_frame().await;
    }

    tracing::info!(level = game.level(), "shutting down");
    Ok(())
}
