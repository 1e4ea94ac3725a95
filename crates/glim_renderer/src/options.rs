//! Resolved render configuration.

/// Render configuration, handed over by the external argument resolver.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Reflection bounce budget for primary rays
    pub bounces: u32,
    /// Cast shadow rays toward each light
    pub shadows: bool,
    /// Jittered supersampling (16 samples per pixel)
    pub jitter: bool,
    /// Render at 3x resolution and Gaussian-downsample the output
    pub filter: bool,
    /// Depth-buffer normalization range
    pub depth_min: f32,
    pub depth_max: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            bounces: 0,
            shadows: false,
            jitter: false,
            filter: false,
            depth_min: 0.0,
            depth_max: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.width, 600);
        assert_eq!(options.height, 600);
        assert_eq!(options.bounces, 0);
        assert!(!options.shadows);
        assert!(!options.jitter);
        assert!(!options.filter);
    }
}
