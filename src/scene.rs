//! Everything that makes up the picture, described without any GL: bodies and
//! their materials, translucent shells, orbit rings, stars and lights. The
//! window layer turns this into scene nodes.

use image::RgbaImage;
use nalgebra::Point3;
use rand::Rng;

use crate::config::{SceneConfig, TextureConfig};
use crate::consts;
use crate::model::{hex_color, BodyInfo, BodyKind, Frame};
use crate::texture::{compose, procedural, LoadedTexture, TextureProvider};

/// A grey-scale map (bump or normal) plus how strongly it shades the surface.
#[derive(Debug, Clone)]
pub struct ReliefMap {
    pub image: RgbaImage,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emissive {
    pub color: Point3<f32>,
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub base: LoadedTexture,
    pub bump: Option<ReliefMap>,
    pub normal: Option<ReliefMap>,
    pub emissive: Option<Emissive>,
}

impl Material {
    /// The single color texture the renderer gets: base color, shaded by the
    /// relief maps, plus the emissive glow.
    pub fn baked(&self) -> RgbaImage {
        let mut image = self.base.image.clone();
        for relief in self.bump.iter().chain(self.normal.iter()) {
            compose::apply_relief(&mut image, &relief.image, relief.scale);
        }
        if let Some(emissive) = self.emissive {
            compose::apply_emissive(&mut image, emissive.color, emissive.intensity);
        }
        image
    }
}

/// A see-through sphere around something: the sun's glow, the atmosphere,
/// the nebula.
#[derive(Debug, Clone)]
pub struct Shell {
    pub frame: Frame,
    pub radius: f32,
    pub color: Point3<f32>,
    pub opacity: f32,
    /// Drawn from the inside, like a sky dome.
    pub inverted: bool,
    pub texture: Option<RgbaImage>,
}

#[derive(Debug, Clone)]
pub struct BodyNode {
    pub info: BodyInfo,
    pub frame: Frame,
    pub material: Material,
    /// Sphere tessellation, in segments around and from pole to pole.
    pub segments: (u32, u32),
    pub shells: Vec<Shell>,
}

/// A circle in the xz-plane of `frame`, centered on its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRing {
    pub frame: Frame,
    pub radius: f32,
    pub segments: usize,
    pub color: Point3<f32>,
    pub opacity: f32,
}

impl OrbitRing {
    pub fn point_at(&self, angle: f32) -> Point3<f32> {
        Point3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    pub points: Vec<Point3<f32>>,
    pub color: Point3<f32>,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point {
        position: Point3<f32>,
        color: Point3<f32>,
        intensity: f32,
        casts_shadows: bool,
    },
    Ambient {
        color: Point3<f32>,
        intensity: f32,
    },
    Directional {
        position: Point3<f32>,
        color: Point3<f32>,
        intensity: f32,
    },
}

pub struct SolarScene {
    pub background: Point3<f32>,
    pub lights: Vec<Light>,
    pub stars: Starfield,
    pub nebula: Shell,
    /// Sun, earth, moon, in that order.
    pub bodies: Vec<BodyNode>,
    pub rings: Vec<OrbitRing>,
}

impl SolarScene {
    pub fn body(&self, kind: BodyKind) -> Option<&BodyNode> {
        self.bodies.iter().find(|b| b.info.kind == kind)
    }

    /// Where the renderer should put its one light.
    pub fn key_light(&self) -> Point3<f32> {
        self.lights
            .iter()
            .find_map(|light| match light {
                Light::Point { position, .. } => Some(*position),
                _ => None,
            })
            .unwrap_or_else(Point3::origin)
    }
}

pub struct SceneBuilder {
    textures: TextureConfig,
    star_count: usize,
}

impl SceneBuilder {
    pub fn new(textures: TextureConfig, scene: &SceneConfig) -> Self {
        SceneBuilder {
            textures,
            star_count: scene.star_count,
        }
    }

    /// Assembles the whole scene. Every texture is resolved before this
    /// returns; failed loads fall back to painted ones, so this can't fail.
    pub fn build(&self, provider: &mut TextureProvider) -> SolarScene {
        self.build_with(provider, &mut rand::thread_rng())
    }

    pub fn build_with<R: Rng + ?Sized>(&self, provider: &mut TextureProvider, rng: &mut R) -> SolarScene {
        provider.report("Initializing scene...");

        provider.report("Creating star field...");
        let stars = starfield(rng, self.star_count, consts::STAR_FIELD_HALF_EXTENT);
        let nebula = nebula_shell(procedural::nebula_with(rng));

        let sun = self.sun(provider);
        let earth = self.earth(provider);
        let moon = self.moon(provider);

        let scene = SolarScene {
            background: hex_color(0x000011),
            lights: lighting_rig(),
            stars,
            nebula,
            bodies: vec![sun, earth, moon],
            rings: orbit_rings(),
        };

        provider.report("✓ Solar system loaded");
        scene
    }

    fn sun(&self, provider: &mut TextureProvider) -> BodyNode {
        let base = provider.load(BodyKind::Sun, &self.textures.sun, procedural::sun_surface);
        BodyNode {
            info: BodyKind::Sun.info(),
            frame: Frame::Sun,
            material: Material {
                base,
                bump: None,
                normal: None,
                emissive: Some(Emissive {
                    color: hex_color(0xffaa00),
                    intensity: 0.3,
                }),
            },
            segments: (32, 32),
            shells: vec![Shell {
                frame: Frame::Sun,
                radius: consts::SUN_GLOW_RADIUS,
                color: hex_color(0xffaa00),
                opacity: 0.2,
                inverted: false,
                texture: None,
            }],
        }
    }

    fn earth(&self, provider: &mut TextureProvider) -> BodyNode {
        let base = provider.load(BodyKind::Earth, &self.textures.earth, procedural::earth_surface);
        let atmosphere = |radius, hex, opacity| Shell {
            frame: Frame::Earth,
            radius,
            color: hex_color(hex),
            opacity,
            inverted: false,
            texture: None,
        };

        BodyNode {
            info: BodyKind::Earth.info(),
            frame: Frame::Earth,
            material: Material {
                base,
                bump: Some(ReliefMap {
                    image: procedural::earth_bump(),
                    scale: 0.1,
                }),
                normal: Some(ReliefMap {
                    image: procedural::earth_normal(),
                    scale: 0.5,
                }),
                emissive: Some(Emissive {
                    color: hex_color(0x000408),
                    intensity: 0.08,
                }),
            },
            segments: (64, 64),
            shells: vec![atmosphere(3.1, 0x87ceeb, 0.2), atmosphere(3.25, 0x4da6ff, 0.08)],
        }
    }

    fn moon(&self, provider: &mut TextureProvider) -> BodyNode {
        let base = provider.load(BodyKind::Moon, &self.textures.moon, procedural::moon_surface);
        BodyNode {
            info: BodyKind::Moon.info(),
            frame: Frame::Moon,
            material: Material {
                base,
                bump: Some(ReliefMap {
                    image: procedural::moon_bump(),
                    scale: 0.05,
                }),
                normal: None,
                emissive: Some(Emissive {
                    color: hex_color(0x080808),
                    intensity: 0.05,
                }),
            },
            segments: (32, 32),
            shells: vec![],
        }
    }
}

/// `count` points, uniform in the cube `[-half_extent, half_extent]³`.
pub fn starfield<R: Rng + ?Sized>(rng: &mut R, count: usize, half_extent: f32) -> Starfield {
    let mut coord = || rng.gen_range(-half_extent..=half_extent);
    let points = (0..count)
        .map(|_| {
            let x = coord();
            let y = coord();
            let z = coord();
            Point3::new(x, y, z)
        })
        .collect();

    Starfield {
        points,
        color: Point3::new(1.0, 1.0, 1.0),
        size: 2.0,
    }
}

fn nebula_shell(texture: RgbaImage) -> Shell {
    Shell {
        frame: Frame::Root,
        radius: consts::NEBULA_RADIUS,
        color: Point3::new(1.0, 1.0, 1.0),
        opacity: 0.3,
        inverted: true,
        texture: Some(texture),
    }
}

fn orbit_rings() -> Vec<OrbitRing> {
    vec![
        // Earth's orbit doesn't move, so it hangs off the root
        OrbitRing {
            frame: Frame::Root,
            radius: consts::EARTH_ORBIT_RADIUS,
            segments: 64,
            color: hex_color(0x4444ff),
            opacity: 0.3,
        },
        // The moon's follows the earth around, tilt and all
        OrbitRing {
            frame: Frame::EarthAxis,
            radius: consts::MOON_ORBIT_RADIUS,
            segments: 32,
            color: hex_color(0xaaaaaa),
            opacity: 0.2,
        },
    ]
}

fn lighting_rig() -> Vec<Light> {
    vec![
        Light::Point {
            position: Point3::origin(),
            color: Point3::new(1.0, 1.0, 1.0),
            intensity: 4.0,
            casts_shadows: true,
        },
        Light::Ambient {
            color: hex_color(0x202040),
            intensity: 0.15,
        },
        Light::Directional {
            position: Point3::new(50.0, 50.0, 50.0),
            color: Point3::new(1.0, 1.0, 1.0),
            intensity: 0.3,
        },
    ]
}
