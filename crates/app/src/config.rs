//! Command-line configuration.
//!
//! Accepted flags:
//! `--gpu-backend=auto|vulkan|dx12|metal|gl`, `--size=WxH`, `--width=N`,
//! `--height=N`, `--assets=DIR`. Unknown flags are ignored.

use std::path::PathBuf;

use asset::paths::DEFAULT_ASSET_DIR;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub assets_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            width: 1280,
            height: 720,
            assets_dir: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut w: Option<u32> = None;
        let mut h: Option<u32> = None;

        for arg in args {
            let arg = arg.as_ref();
            if let Some(val) = arg.strip_prefix("--gpu-backend=") {
                config.backends = parse_backend(val);
            } else if let Some(v) = arg.strip_prefix("--size=") {
                match v.split_once('x').or_else(|| v.split_once('X')) {
                    Some((sw, sh)) => match (sw.parse::<u32>(), sh.parse::<u32>()) {
                        (Ok(pw), Ok(ph)) => {
                            w = Some(pw);
                            h = Some(ph);
                        }
                        _ => log::warn!("Ignoring malformed --size '{}'", v),
                    },
                    None => log::warn!("Ignoring malformed --size '{}'", v),
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(pw) = v.parse::<u32>() {
                    w = Some(pw);
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(ph) = v.parse::<u32>() {
                    h = Some(ph);
                }
            } else if let Some(v) = arg.strip_prefix("--assets=") {
                config.assets_dir = PathBuf::from(v);
            }
        }

        config.width = w.unwrap_or(config.width).max(1);
        config.height = h.unwrap_or(config.height).max(1);
        config
    }
}

fn parse_backend(val: &str) -> wgpu::Backends {
    match val.to_ascii_lowercase().as_str() {
        "auto" => wgpu::Backends::all(),
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        "metal" | "mtl" => wgpu::Backends::METAL,
        "gl" | "opengl" | "gles" => wgpu::Backends::GL,
        other => {
            log::warn!("Unknown backend '{}', falling back to auto.", other);
            wgpu::Backends::all()
        }
    }
}
