//! Text blitter demo application
//!
//! Packs (or loads) the configured fonts, then runs a short headless frame
//! loop that blits a colored paragraph each frame and reports the resulting
//! mesh. Reads `blitter.toml` from the working directory when present.

use std::path::Path;

use text_blitter::foundation::logging;
use text_blitter::{BlitterConfig, HeadlessBackend, TextBlitter};

const CONFIG_PATH: &str = "blitter.toml";
const FONT: &str = "StandardFont";
const FRAMES: u32 = 3;

const PARAGRAPH: &str = "Sirens blaring at us,\n\
but he only sped up,\n\
might leave in a [COL=0.9,0.1,0.1]bodybag[COL=1,1,1], \n\
never in [COL=0,0.9,0]cuffs[COL=1,1,1].";

fn create_blitter() -> Result<TextBlitter, Box<dyn std::error::Error>> {
    if Path::new(CONFIG_PATH).is_file() {
        Ok(TextBlitter::from_config_file(CONFIG_PATH, HeadlessBackend::new())?)
    } else {
        log::info!("No {} found, using defaults", CONFIG_PATH);
        Ok(TextBlitter::create(BlitterConfig::default(), HeadlessBackend::new()))
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut blitter = create_blitter()?;

    let report = blitter.init();
    for (font, reason) in &report.failed {
        log::error!("Font '{}' unavailable: {}", font, reason);
    }

    for _ in 0..FRAMES {
        blitter.blit_text(PARAGRAPH, FONT, 42.0, 42.0, 876, 765, 3.5);
        blitter.update();

        match blitter.font_mesh(FONT) {
            Some(mesh) => log::info!(
                "Frame {}: {} indices in vertex buffer {:?} / index buffer {:?}",
                blitter.frame(),
                mesh.index_count(),
                mesh.vertex_buffer(),
                mesh.index_buffer()
            ),
            None => log::warn!("Frame {}: nothing to draw for '{}'", blitter.frame(), FONT),
        }
    }

    blitter.shutdown();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting text blitter demo");
    match run() {
        Ok(()) => {
            log::info!("Text blitter demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Application error: {:?}", e);
            Err(e)
        }
    }
}
