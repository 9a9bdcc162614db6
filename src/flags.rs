//! Flag artwork.
//!
//! Flags are drawn as coloured cell grids so they can be rendered by the TUI
//! and by plain ANSI output alike. Designs are simplified to their stripes,
//! canton and crosses; emblems are omitted.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour used for countries without artwork.
pub const PLACEHOLDER: Rgb = Rgb::new(96, 96, 96);

const WHITE: Rgb = Rgb::new(255, 255, 255);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// One stripe and its relative thickness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Stripe colour.
    pub color: Rgb,
    /// Relative thickness.
    pub weight: u8,
}

const fn band(color: Rgb, weight: u8) -> Band {
    Band { color, weight }
}

/// Layout of a flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Design {
    /// Stripes stacked top to bottom.
    Horizontal(&'static [Band]),
    /// Stripes laid out left to right.
    Vertical(&'static [Band]),
    /// Horizontal stripes with a solid upper-hoist rectangle.
    Canton {
        /// Stripes behind the canton.
        stripes: &'static [Band],
        /// Canton colour.
        canton: Rgb,
        /// Canton width as a fraction of the flag width.
        width: f32,
        /// Canton height as a fraction of the flag height.
        height: f32,
    },
    /// Solid field with a bordered centred cross and saltire.
    Union {
        /// Background.
        field: Rgb,
        /// Cross colour.
        cross: Rgb,
        /// Border around the cross.
        border: Rgb,
    },
}

/// Artwork for one country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flag {
    /// Country identifier as used in the candidate pool.
    pub country: &'static str,
    /// How the flag is laid out.
    pub design: Design,
}

const US_RED: Rgb = Rgb::new(178, 34, 52);
const US_STRIPES: &[Band] = &[
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
    band(WHITE, 1),
    band(US_RED, 1),
];

/// Every flag with artwork.
pub static FLAGS: &[Flag] = &[
    Flag {
        country: "Pakistan",
        design: Design::Vertical(&[band(WHITE, 1), band(Rgb::new(1, 65, 28), 3)]),
    },
    Flag {
        country: "Estonia",
        design: Design::Horizontal(&[
            band(Rgb::new(0, 114, 206), 1),
            band(BLACK, 1),
            band(WHITE, 1),
        ]),
    },
    Flag {
        country: "France",
        design: Design::Vertical(&[
            band(Rgb::new(0, 35, 149), 1),
            band(WHITE, 1),
            band(Rgb::new(237, 41, 57), 1),
        ]),
    },
    Flag {
        country: "Germany",
        design: Design::Horizontal(&[
            band(BLACK, 1),
            band(Rgb::new(221, 0, 0), 1),
            band(Rgb::new(255, 206, 0), 1),
        ]),
    },
    Flag {
        country: "Ireland",
        design: Design::Vertical(&[
            band(Rgb::new(22, 155, 98), 1),
            band(WHITE, 1),
            band(Rgb::new(255, 136, 62), 1),
        ]),
    },
    Flag {
        country: "Italy",
        design: Design::Vertical(&[
            band(Rgb::new(0, 146, 70), 1),
            band(WHITE, 1),
            band(Rgb::new(206, 43, 55), 1),
        ]),
    },
    Flag {
        country: "Nigeria",
        design: Design::Vertical(&[
            band(Rgb::new(0, 135, 81), 1),
            band(WHITE, 1),
            band(Rgb::new(0, 135, 81), 1),
        ]),
    },
    Flag {
        country: "Poland",
        design: Design::Horizontal(&[band(WHITE, 1), band(Rgb::new(220, 20, 60), 1)]),
    },
    Flag {
        country: "Russia",
        design: Design::Horizontal(&[
            band(WHITE, 1),
            band(Rgb::new(0, 57, 166), 1),
            band(Rgb::new(213, 43, 30), 1),
        ]),
    },
    Flag {
        country: "Spain",
        design: Design::Horizontal(&[
            band(Rgb::new(170, 21, 27), 1),
            band(Rgb::new(241, 191, 0), 2),
            band(Rgb::new(170, 21, 27), 1),
        ]),
    },
    Flag {
        country: "UK",
        design: Design::Union {
            field: Rgb::new(1, 33, 105),
            cross: Rgb::new(200, 16, 46),
            border: WHITE,
        },
    },
    Flag {
        country: "US",
        design: Design::Canton {
            stripes: US_STRIPES,
            canton: Rgb::new(60, 59, 110),
            width: 0.4,
            height: 7.0 / 13.0,
        },
    },
];

static BY_NAME: LazyLock<HashMap<String, &'static Flag>> = LazyLock::new(|| {
    FLAGS
        .iter()
        .map(|flag| (flag.country.to_ascii_lowercase(), flag))
        .collect()
});

/// Artwork for `country`, matched case-insensitively.
pub fn lookup(country: &str) -> Option<&'static Flag> {
    BY_NAME.get(&country.trim().to_ascii_lowercase()).copied()
}

/// Whether `country` has artwork.
pub fn has_artwork(country: &str) -> bool {
    lookup(country).is_some()
}

fn pick_band(bands: &[Band], pos: f32) -> Rgb {
    let total: u32 = bands.iter().map(|b| u32::from(b.weight)).sum();
    if total == 0 {
        return PLACEHOLDER;
    }
    let target = pos.clamp(0.0, 1.0) * total as f32;
    let mut edge = 0.0;
    for b in bands {
        edge += f32::from(b.weight);
        if target < edge {
            return b.color;
        }
    }
    bands.last().map_or(PLACEHOLDER, |b| b.color)
}

impl Flag {
    /// Colour at normalised position `(x, y)`, both in `0.0..=1.0`, origin
    /// top-left.
    pub fn color_at(&self, x: f32, y: f32) -> Rgb {
        match self.design {
            Design::Horizontal(bands) => pick_band(bands, y),
            Design::Vertical(bands) => pick_band(bands, x),
            Design::Canton {
                stripes,
                canton,
                width,
                height,
            } => {
                if x < width && y < height {
                    canton
                } else {
                    pick_band(stripes, y)
                }
            }
            Design::Union {
                field,
                cross,
                border,
            } => {
                let dx = (x - 0.5).abs();
                let dy = (y - 0.5).abs();
                // Saltire runs corner to corner; compare in flag space.
                let diag = (dx - dy).abs();
                if dx < 0.06 || dy < 0.1 {
                    cross
                } else if dx < 0.1 || dy < 0.17 {
                    border
                } else if diag < 0.03 {
                    cross
                } else if diag < 0.08 {
                    border
                } else {
                    field
                }
            }
        }
    }

    /// Sample the flag onto a `width` x `height` grid, row-major.
    pub fn grid(&self, width: usize, height: usize) -> Vec<Vec<Rgb>> {
        (0..height)
            .map(|row| {
                let y = (row as f32 + 0.5) / height as f32;
                (0..width)
                    .map(|col| {
                        let x = (col as f32 + 0.5) / width as f32;
                        self.color_at(x, y)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Grid for `country`, filled with [`PLACEHOLDER`] when there is no artwork.
pub fn flag_grid(country: &str, width: usize, height: usize) -> Vec<Vec<Rgb>> {
    match lookup(country) {
        Some(flag) => flag.grid(width, height),
        None => vec![vec![PLACEHOLDER; width]; height],
    }
}
