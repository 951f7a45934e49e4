use std::path::Path;

use image::imageops::FilterType;

use crate::config::palette;
use crate::ecs::components::{Skin, PLAYER_SIZE};
use crate::error::SkinError;

/// Side length of a skin texture in pixels.
pub const SKIN_PX: u32 = PLAYER_SIZE.x as u32;

/// RGBA8 pixels for both skins, in texture layer order.
pub struct SkinImages {
    pub layers: [Vec<u8>; 2],
    /// False when placeholders are in use.
    pub from_files: bool,
}

fn load_one(dir: &Path, skin: Skin) -> Result<Vec<u8>, SkinError> {
    let path = dir.join(skin.file_name());
    let img = image::open(&path).map_err(|source| SkinError::Load {
        path: path.clone(),
        source,
    })?;
    Ok(img
        .resize_exact(SKIN_PX, SKIN_PX, FilterType::Nearest)
        .to_rgba8()
        .into_raw())
}

fn placeholder(color: [u8; 4]) -> Vec<u8> {
    color.repeat((SKIN_PX * SKIN_PX) as usize)
}

/// Load both skin images from `dir`, scaled to 64x64. If either one is
/// missing or unreadable both skins fall back to flat placeholders.
pub fn load_skins(dir: &Path) -> SkinImages {
    let loaded = load_one(dir, Skin::Cheryl)
        .and_then(|cheryl| load_one(dir, Skin::Brett).map(|brett| [cheryl, brett]));

    match loaded {
        Ok(layers) => {
            log::info!("Loaded skins from {}", dir.display());
            SkinImages {
                layers,
                from_files: true,
            }
        }
        Err(e) => {
            log::warn!("{e}. Using placeholder skins.");
            SkinImages {
                layers: [
                    placeholder(palette::PLACEHOLDER_CHERYL),
                    placeholder(palette::PLACEHOLDER_BRETT),
                ],
                from_files: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_placeholders() {
        let dir = std::env::temp_dir().join("cat-adventure-no-such-dir");
        let skins = load_skins(&dir);
        assert!(!skins.from_files);

        let expected = (SKIN_PX * SKIN_PX * 4) as usize;
        assert_eq!(skins.layers[0].len(), expected);
        assert_eq!(skins.layers[1].len(), expected);
        assert_eq!(&skins.layers[0][..4], &palette::PLACEHOLDER_CHERYL);
        assert_eq!(&skins.layers[1][..4], &palette::PLACEHOLDER_BRETT);
    }

    #[test]
    fn loads_and_scales_png() {
        let dir = std::env::temp_dir().join(format!("cat-adventure-skins-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let red = image::RgbaImage::from_pixel(16, 16, image::Rgba([200, 10, 10, 255]));
        let blue = image::RgbaImage::from_pixel(128, 32, image::Rgba([10, 10, 200, 255]));
        red.save(dir.join("cheryl.png")).unwrap();
        blue.save(dir.join("brett.png")).unwrap();

        let skins = load_skins(&dir);
        assert!(skins.from_files);
        assert_eq!(skins.layers[0].len(), (SKIN_PX * SKIN_PX * 4) as usize);
        assert_eq!(&skins.layers[0][..4], &[200, 10, 10, 255]);
        assert_eq!(&skins.layers[1][..4], &[10, 10, 200, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("cat-adventure-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cheryl.png"), b"not a png").unwrap();
        std::fs::write(dir.join("brett.png"), b"not a png").unwrap();

        assert!(!load_skins(&dir).from_files);

        std::fs::remove_dir_all(&dir).ok();
    }
}
