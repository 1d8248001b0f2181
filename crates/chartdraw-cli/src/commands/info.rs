//! Info command implementation
//!
//! Lists the backends compiled into this build and the demo scenes.

use anyhow::Result;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    // No filter flags means show everything
    let show_all = !args.backends && !args.scenes;

    println!("chartdraw v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.backends {
        print_backends();
        if show_all {
            println!();
        }
    }

    if show_all || args.scenes {
        print_scenes();
    }

    Ok(())
}

fn print_backends() {
    println!("Backends:");
    for name in chartdraw::available_backends() {
        let description = match name {
            "skia" => "tiny-skia raster, PNG output, pixel-aligned",
            "svg" => "SVG document, unaligned vector coordinates",
            "json" => "JSON recording of every resolved draw command",
            _ => "",
        };
        println!("  {:<8} - {}", name, description);
    }
}

fn print_scenes() {
    println!("Scenes:");
    println!("  triangle - stroked right triangle");
    println!("  circle   - filled and outlined circle");
    println!("  markers  - one marker of each point shape");
    println!("  text     - anchored, multi-line and rotated labels (needs fonts)");
    println!("  all      - every scene in a clipped 2x2 grid (needs fonts)");
}
