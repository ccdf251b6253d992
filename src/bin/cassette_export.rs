//! Headless Cassette Export
//!
//! Run with: `cargo run --bin cassette-export -- [assembled|exploded] [ply] [glb] [html]`
//!
//! Builds the cassette model without a window and writes the requested
//! export formats to the working directory. With no format arguments,
//! all three are written. The pose argument selects the exploded
//! (default) or fully assembled state; assembled snapshots are produced
//! by driving the same animations the viewer uses to completion.

use cassette_engine::anim::GLIDE_DURATION;
use cassette_engine::dims::Dimensions;
use cassette_engine::export;
use cassette_engine::scene::CassetteScene;

fn usage() -> ! {
    println!("Usage: cassette-export [assembled|exploded] [ply] [glb] [html]");
    println!("  pose defaults to exploded; with no formats, all are written");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut assembled = false;
    let mut formats: Vec<&str> = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "assembled" => assembled = true,
            "exploded" => assembled = false,
            "ply" | "glb" | "html" => formats.push(arg.as_str()),
            _ => usage(),
        }
    }
    if formats.is_empty() {
        formats = vec!["ply", "glb", "html"];
    }

    println!("[Cassette Export] Building cassette model...");
    let mut scene = CassetteScene::new(&Dimensions::default());

    if assembled {
        // Run the assembly sequence to completion: both carts lock,
        // then the cap drops.
        scene.lock_sliders(0.0);
        scene.tick(GLIDE_DURATION);
        scene.assemble_cap(GLIDE_DURATION);
        scene.tick(2.0 * GLIDE_DURATION);
        println!("[Cassette Export] Snapshotting assembled pose");
    } else {
        println!("[Cassette Export] Snapshotting exploded pose");
    }

    let mut failed = false;
    for format in formats {
        let result = match format {
            "ply" => export::ply::write_ply(&scene, "cassette.ply").map(|_| "cassette.ply"),
            "glb" => export::glb::write_glb(&scene, "cassette.glb").map(|_| "cassette.glb"),
            _ => export::html::write_html(&scene, "cassette_viewer.html")
                .map(|_| "cassette_viewer.html"),
        };
        match result {
            Ok(name) => println!("[Cassette Export] Wrote {name}"),
            Err(e) => {
                eprintln!("[Cassette Export] {format} export failed: {e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
