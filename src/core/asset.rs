//=========================================================================
// Image Assets
//=========================================================================
//
// Handles to externally loaded images.
//
// Decoding and fetching belong to the host. The scene graph only needs
// to know whether an image is ready and what its natural size is, so a
// handle starts out pending and is completed by the loader once the
// dimensions are known. Pending images render as nothing.
//
//   AssetLoader::load_image(src) ──> ImageHandle (pending)
//                                         │
//   host decode finishes ──complete(w, h)─┘──> ready
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

//=== ImageHandle =========================================================

struct ImageResource {
    source: String,
    natural_size: Cell<Option<(f64, f64)>>,
}

/// Shared, read-only reference to an image resource.
///
/// Clones point at the same resource; completing one completes all.
#[derive(Clone)]
pub struct ImageHandle(Rc<ImageResource>);

impl ImageHandle {
    /// A handle whose load has not finished yet.
    pub fn pending(source: impl Into<String>) -> Self {
        Self(Rc::new(ImageResource {
            source: source.into(),
            natural_size: Cell::new(None),
        }))
    }

    /// A handle that is already decoded.
    pub fn loaded(source: impl Into<String>, width: f64, height: f64) -> Self {
        let handle = Self::pending(source);
        handle.complete(width, height);
        handle
    }

    /// Placeholder with no source. Never becomes ready on its own.
    pub fn empty() -> Self {
        Self::pending(String::new())
    }

    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// Marks the image as decoded with the given natural dimensions.
    pub fn complete(&self, width: f64, height: f64) {
        debug!("Image '{}' ready ({}x{})", self.0.source, width, height);
        self.0.natural_size.set(Some((width, height)));
    }

    pub fn is_ready(&self) -> bool {
        self.0.natural_size.get().is_some()
    }

    /// Natural `(width, height)`, or `(0, 0)` while pending.
    pub fn natural_size(&self) -> (f64, f64) {
        self.0.natural_size.get().unwrap_or((0.0, 0.0))
    }

    /// Returns `true` if both handles refer to the same resource.
    pub fn ptr_eq(&self, other: &ImageHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("source", &self.0.source)
            .field("natural_size", &self.0.natural_size.get())
            .finish()
    }
}

//=== AssetLoader =========================================================

/// Host-side image loader.
///
/// Implementations return immediately with a pending handle and call
/// [`ImageHandle::complete`] when decoding finishes.
pub trait AssetLoader {
    fn load_image(&mut self, source: &str) -> ImageHandle;
}

//=== ImageCache ==========================================================

/// Deduplicates loads so every sprite using a source shares one resource.
pub struct ImageCache<L: AssetLoader> {
    loader: L,
    images: HashMap<String, ImageHandle>,
}

impl<L: AssetLoader> ImageCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            images: HashMap::new(),
        }
    }

    /// Returns the cached handle for `source`, loading it on first use.
    pub fn get(&mut self, source: &str) -> ImageHandle {
        if let Some(handle) = self.images.get(source) {
            return handle.clone();
        }

        let handle = self.loader.load_image(source);
        self.images.insert(source.to_string(), handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}

//=========================================================================
// Tests
//=========================================================================
