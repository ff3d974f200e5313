//! RGBA8 textures sampled by the mesh shader and used as framebuffer targets.

use super::error::GraphicsError;

/// Configuration for creating a GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// GL internal format (e.g. `glow::RGBA8`).
    pub internal_format: u32,
    /// GL minification filter.
    pub min_filter: u32,
    /// GL magnification filter.
    pub mag_filter: u32,
}

impl TextureConfig {
    /// RGBA8 with LINEAR filtering, the format of every sandbox texture.
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            internal_format: glow::RGBA8,
            min_filter: glow::LINEAR,
            mag_filter: glow::LINEAR,
        }
    }

    /// Both sides are powers of two, so the texture can be mipmapped.
    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }

    /// Bytes an RGBA8 upload of this size must contain.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Returns the GL pixel type that corresponds to a given internal format.
pub fn pixel_type_for_format(internal_format: u32) -> u32 {
    match internal_format {
        glow::RGBA16F | glow::RGB16F => glow::HALF_FLOAT,
        glow::RGBA32F | glow::RGB32F => glow::FLOAT,
        _ => glow::UNSIGNED_BYTE,
    }
}

fn check_pixels(config: &TextureConfig, pixels: Option<&[u8]>) -> Result<(), GraphicsError> {
    match pixels {
        Some(data) if data.len() != config.byte_len() => Err(GraphicsError::PixelDataSize {
            width: config.width,
            height: config.height,
            expected: config.byte_len(),
            got: data.len(),
        }),
        _ => Ok(()),
    }
}

/// A 2D texture and the size it was last uploaded at.
#[derive(Debug)]
pub struct Texture {
    handle: glow::Texture,
    config: TextureConfig,
}

impl Texture {
    /// Creates a texture of the given size, optionally filled with RGBA8 `pixels`.
    ///
    /// Wrap mode is `CLAMP_TO_EDGE` on both axes and filtering is LINEAR, so
    /// any size is sampleable without mipmaps.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::PixelDataSize` if `pixels` does not hold
    /// `width * height * 4` bytes, or `ResourceCreation` if the driver
    /// refuses the texture.
    #[allow(unsafe_code)]
    pub fn new(
        gl: &glow::Context,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) -> Result<Self, GraphicsError> {
        use glow::HasContext;

        let config = TextureConfig::rgba8(width, height);
        check_pixels(&config, pixels)?;

        // SAFETY: glow wraps raw GL calls as unsafe. We create, configure,
        // and allocate a texture using valid parameters derived from TextureConfig.
        let handle = unsafe { gl.create_texture().map_err(GraphicsError::creation("texture"))? };
        let texture = Self { handle, config };

        texture.scope(gl, || {
            set_wrap_clamp(gl);
            set_filters(gl, &config);
            upload(gl, &config, pixels);
        });

        log::debug!("created {width}x{height} texture");
        Ok(texture)
    }

    /// Replaces the contents with `pixels` at a possibly different size.
    ///
    /// Power-of-two textures get a mipmap chain and trilinear filtering;
    /// anything else is clamped and filtered LINEAR.
    ///
    /// # Errors
    ///
    /// Returns `GraphicsError::PixelDataSize` if `pixels` does not hold
    /// `width * height * 4` bytes.
    #[allow(unsafe_code)]
    pub fn update(
        &mut self,
        gl: &glow::Context,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<(), GraphicsError> {
        use glow::HasContext;

        let mut config = TextureConfig::rgba8(width, height);
        check_pixels(&config, Some(pixels))?;
        let mipmapped = config.is_power_of_two();
        if mipmapped {
            config.min_filter = glow::LINEAR_MIPMAP_LINEAR;
        }

        self.scope(gl, || {
            upload(gl, &config, Some(pixels));
            if mipmapped {
                // SAFETY: the texture is bound and level 0 was just uploaded.
                unsafe { gl.generate_mipmap(glow::TEXTURE_2D) };
            } else {
                set_wrap_clamp(gl);
            }
            set_filters(gl, &config);
        });

        self.config = config;
        Ok(())
    }

    pub fn handle(&self) -> glow::Texture {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid texture handle created in new().
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(self.handle)) };
    }

    #[allow(unsafe_code)]
    pub fn unbind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: unbinding TEXTURE_2D is always valid.
        unsafe { gl.bind_texture(glow::TEXTURE_2D, None) };
    }

    /// Runs `f` with this texture bound to `TEXTURE_2D`, then unbinds it.
    pub fn scope<R>(&self, gl: &glow::Context, f: impl FnOnce() -> R) -> R {
        self.bind(gl);
        let result = f();
        self.unbind(gl);
        result
    }

    /// Deletes the texture, releasing GPU memory.
    #[allow(unsafe_code)]
    pub fn destroy(self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.handle is a valid texture; consuming self prevents reuse.
        unsafe { gl.delete_texture(self.handle) };
    }
}

/// Uploads level 0 of the currently bound `TEXTURE_2D`.
#[allow(unsafe_code)]
fn upload(gl: &glow::Context, config: &TextureConfig, pixels: Option<&[u8]>) {
    use glow::HasContext;

    // SAFETY: callers check `pixels` against the config size before uploading.
    unsafe {
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            config.internal_format as i32,
            config.width as i32,
            config.height as i32,
            0,
            glow::RGBA,
            pixel_type_for_format(config.internal_format),
            glow::PixelUnpackData::Slice(pixels),
        );
    }
}

#[allow(unsafe_code)]
fn set_wrap_clamp(gl: &glow::Context) {
    use glow::HasContext;

    // SAFETY: valid parameter names and values for the bound TEXTURE_2D.
    unsafe {
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
    }
}

#[allow(unsafe_code)]
fn set_filters(gl: &glow::Context, config: &TextureConfig) {
    use glow::HasContext;

    // SAFETY: valid parameter names and values for the bound TEXTURE_2D.
    unsafe {
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            config.min_filter as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            config.mag_filter as i32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_sets_correct_dimensions() {
        let config = TextureConfig::rgba8(1024, 768);
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert_eq!(config.internal_format, glow::RGBA8, "expected RGBA8 internal format");
    }

    #[test]
    fn rgba8_uses_linear_filters() {
        let config = TextureConfig::rgba8(256, 256);
        assert_eq!(config.min_filter, glow::LINEAR, "expected LINEAR min filter");
        assert_eq!(config.mag_filter, glow::LINEAR, "expected LINEAR mag filter");
    }

    #[test]
    fn power_of_two_requires_both_sides() {
        assert!(TextureConfig::rgba8(256, 64).is_power_of_two());
        assert!(!TextureConfig::rgba8(256, 100).is_power_of_two());
        assert!(!TextureConfig::rgba8(300, 256).is_power_of_two());
        assert!(!TextureConfig::rgba8(0, 256).is_power_of_two());
    }

    #[test]
    fn byte_len_is_four_bytes_per_pixel() {
        assert_eq!(TextureConfig::rgba8(3, 2).byte_len(), 24);
    }

    #[test]
    fn pixel_type_for_rgba16f_is_half_float() {
        assert_eq!(pixel_type_for_format(glow::RGBA16F), glow::HALF_FLOAT);
    }

    #[test]
    fn pixel_type_for_rgba32f_is_float() {
        assert_eq!(pixel_type_for_format(glow::RGBA32F), glow::FLOAT);
    }

    #[test]
    fn pixel_type_for_rgba8_is_unsigned_byte() {
        assert_eq!(pixel_type_for_format(glow::RGBA8), glow::UNSIGNED_BYTE);
    }

    #[test]
    fn pixel_check_accepts_matching_or_missing_data() {
        let config = TextureConfig::rgba8(2, 2);
        assert!(check_pixels(&config, None).is_ok());
        assert!(check_pixels(&config, Some(&[0u8; 16])).is_ok());
    }

    #[test]
    fn pixel_check_rejects_short_data() {
        let config = TextureConfig::rgba8(2, 2);
        let err = check_pixels(&config, Some(&[0u8; 12])).unwrap_err();
        assert!(
            matches!(err, GraphicsError::PixelDataSize { expected: 16, got: 12, .. }),
            "expected PixelDataSize, got: {err:?}"
        );
    }

    #[test]
    #[ignore = "requires GL context"]
    fn update_generates_mipmaps_for_power_of_two() {
        // Would test: update(gl, 4, 4, ..) sets LINEAR_MIPMAP_LINEAR min filter.
    }
}
