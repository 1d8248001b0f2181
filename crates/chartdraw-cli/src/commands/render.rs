//! Render command implementation
//!
//! Draws one demo scene through the chosen backend and writes the result.

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use chartdraw::fontdb::FontBook;
use chartdraw::prelude::{run_backend, FontProvider};
use chartdraw::render_json::RecordingBackend;
use chartdraw::render_skia::{RasterOptions, SkiaBackend};
use chartdraw::render_svg::{SvgBackend, SvgOptions};

use crate::cli::{BackendKind, RenderArgs};
use crate::scenes;

pub fn run(args: &RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("surface must be at least 1x1, got {}x{}", args.width, args.height);
    }
    let fonts = load_fonts(args)?;
    let (width, height) = (f64::from(args.width), f64::from(args.height));
    let scene = args.scene;
    let font = args.font.as_str();
    let what = || format!("drawing the {:?} scene with the {:?} backend", scene, args.backend);

    let bytes = match args.backend {
        BackendKind::Skia => {
            let options = RasterOptions::new(args.width, args.height);
            let backend = SkiaBackend::new(options, fonts)?;
            let image = run_backend(backend, |b| scenes::draw(b, scene, width, height, font))
                .with_context(what)?;
            image.encode_png()?
        },
        BackendKind::Svg => {
            let backend = SvgBackend::new(SvgOptions::new(width, height), fonts);
            run_backend(backend, |b| scenes::draw(b, scene, width, height, font))
                .with_context(what)?
                .into_bytes()
        },
        BackendKind::Json => {
            let backend = RecordingBackend::new(fonts);
            let recording = run_backend(backend, |b| scenes::draw(b, scene, width, height, font))
                .with_context(what)?;
            recording.to_json()?.into_bytes()
        },
    };

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("wrote {} bytes to {}", bytes.len(), args.output.display());
    println!("Wrote {} ({} bytes)", args.output.display(), bytes.len());
    Ok(())
}

fn load_fonts(args: &RenderArgs) -> Result<Arc<dyn FontProvider>> {
    let book = if args.no_system_fonts {
        FontBook::new()
    } else {
        FontBook::system()
    };
    for path in &args.font_files {
        book.load_font_file(path)
            .with_context(|| format!("loading font {}", path.display()))?;
    }
    log::debug!("{} font faces available", book.face_count());

    if args.scene.needs_fonts() && book.face_count() == 0 {
        bail!(
            "the {:?} scene draws text but no fonts are available; pass --font-file",
            args.scene
        );
    }
    let fonts: Arc<dyn FontProvider> = Arc::new(book);
    Ok(fonts)
}
