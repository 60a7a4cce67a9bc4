use crate::constants::{PARTICLE_COUNT, RING_RADIUS, STAR_COUNT};

/// Images shown when the host does not supply its own list.
pub const DEFAULT_IMAGE_URLS: [&str; 12] = [
    "https://picsum.photos/id/1015/400/250",
    "https://picsum.photos/id/1016/400/250",
    "https://picsum.photos/id/1018/400/250",
    "https://picsum.photos/id/1021/400/250",
    "https://picsum.photos/id/1025/400/250",
    "https://picsum.photos/id/1035/400/250",
    "https://picsum.photos/id/1041/400/250",
    "https://picsum.photos/id/1043/400/250",
    "https://picsum.photos/id/1044/400/250",
    "https://picsum.photos/id/1045/400/250",
    "https://picsum.photos/id/1046/400/250",
    "https://picsum.photos/id/1047/400/250",
];

/// Runtime knobs for one mounted gallery.
#[derive(Clone, Debug)]
pub struct GalleryConfig {
    /// Ordered image identifiers; one ring panel per entry.
    pub image_urls: Vec<String>,
    /// Seed for the star and particle scatter.
    pub seed: u64,
    pub star_count: usize,
    pub particle_count: usize,
    pub ring_radius: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_urls: DEFAULT_IMAGE_URLS.iter().map(|u| u.to_string()).collect(),
            seed: 42,
            star_count: STAR_COUNT,
            particle_count: PARTICLE_COUNT,
            ring_radius: RING_RADIUS,
        }
    }
}

impl GalleryConfig {
    /// Default config with a caller-provided image list.
    pub fn with_images<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            image_urls: urls.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn image_count(&self) -> usize {
        self.image_urls.len()
    }
}
