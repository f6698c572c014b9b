//! gesture_tree — interactive entry point.

use std::path::PathBuf;

use gesture_tree::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║      Gesture Tree — hand-controlled ornament formation       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();
    println!("  Controls: hold SPACE to close the fist and assemble the tree,");
    println!("  LEFT/RIGHT to sway the formation, H to hide the hand, Q to quit.");
    println!();

    let cfg = parse_args();
    match &cfg.assets_dir {
        Some(dir) => println!("  Photos: {}", dir.display()),
        None      => println!("  Photos: none (all-lights tree; pass a directory to add photos)"),
    }
    println!("  Ornaments: {}", cfg.entity_count);
    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `gesture_tree [ASSETS_DIR] [--count N]`
fn parse_args() -> AppConfig {
    let mut cfg = AppConfig::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => {
                if let Some(n) = args.next().and_then(|v| v.parse::<usize>().ok()) {
                    cfg.entity_count = n.clamp(1, 2000);
                }
            }
            other if !other.starts_with("--") => {
                cfg.assets_dir = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("  (ignoring unknown flag {})", other);
            }
        }
    }
    cfg
}
