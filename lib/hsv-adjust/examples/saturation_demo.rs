use hsv_adjust::{AdjustResult, Effect, HsvAdjustConfig};
use image::ImageReader;
use std::path::Path;

fn main() -> AdjustResult<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgba8();

    // slider moves from 50 to each of these levels
    let levels = [0.0, 25.0, 75.0, 100.0];

    for level in levels {
        let mut test_img = img.clone();
        HsvAdjustConfig::saturation(50.0, level).apply(&mut test_img)?;

        let filename = format!("saturation_{level}.png");
        test_img.save(output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All saturation adjustments applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
