//! Image decoding and the bookkeeping that keeps late decodes from clobbering
//! newer state.
//!
//! The host fetches bytes asynchronously (file read, network fetch) and can
//! finish out of order. Every request is stamped with a [`DecodeTicket`] from
//! [`Generations`]; a completion is only applied while its ticket is still the
//! latest one issued for its slot.

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;

use image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("decoded image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Decode any supported raster format into straight-alpha RGBA8.
///
/// # Errors
///
/// Returns `Image` for unrecognised or corrupt data and `EmptyImage` for a
/// zero-area result.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    Ok(rgba)
}

/// Which layer a decode request populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Background,
    Asset,
}

/// Receipt for an in-flight decode. Hand it back with the bytes on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket {
    slot: Slot,
    generation: u64,
}

impl DecodeTicket {
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }
}

/// Per-slot generation counters.
#[derive(Debug, Default)]
pub struct Generations {
    background: u64,
    asset: u64,
}

impl Generations {
    /// Start a new request for `slot`, superseding any earlier ticket.
    pub fn issue(&mut self, slot: Slot) -> DecodeTicket {
        let counter = self.counter_mut(slot);
        *counter += 1;
        DecodeTicket { slot, generation: *counter }
    }

    /// Supersede outstanding tickets for `slot` without starting a new request.
    pub fn invalidate(&mut self, slot: Slot) {
        *self.counter_mut(slot) += 1;
    }

    /// Whether `ticket` is the most recent one issued for its slot.
    #[must_use]
    pub fn is_current(&self, ticket: DecodeTicket) -> bool {
        let current = match ticket.slot {
            Slot::Background => self.background,
            Slot::Asset => self.asset,
        };
        ticket.generation == current
    }

    fn counter_mut(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Background => &mut self.background,
            Slot::Asset => &mut self.asset,
        }
    }
}
