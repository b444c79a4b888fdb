//! Submesh records: material parameters, texture references, and geometry.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::error::{DecodeError, Result};
use crate::reader::Reader;

/// Width of a fixed-length name field in a submesh record.
const NAME_FIELD_WIDTH: usize = 0x20;

/// What a submesh represents in the source engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubMeshKind {
    VisibleObject,
    HelperObject,
    BitmapAlpha,
    BitmapGrass,
    ParticleEmitter,
}

impl SubMeshKind {
    /// Map the on-disk value to a kind, if it is one of the known five.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::VisibleObject),
            1 => Some(Self::HelperObject),
            2 => Some(Self::BitmapAlpha),
            3 => Some(Self::BitmapGrass),
            4 => Some(Self::ParticleEmitter),
            _ => None,
        }
    }
}

/// Material/shader selector stored per submesh.
///
/// The value space is sparse; only these variants were ever observed in
/// shipped files. Anything else is carried through as `Unknown` so that
/// import policy can still make a decision on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaterialType {
    Texture,
    TextureWithGlareMap,
    AlphaTextureNoGlare,
    AlphaTextureWithOverlap,
    TextureWithGlareMap2,
    AlphaTextureDoubleSided,
    DetalizationObjectGrass,
    Fire,
    MaterialOnly,
    TextureWithDetalizationMap,
    DetalizationObjectStone,
    TextureWithDetalizationMapWithoutModulation,
    TiledTexture,
    TextureWithGlareMapAndMask,
    TextureWithMask,
    Fire2,
    /// A value with no confirmed meaning; preserved verbatim.
    Unknown(u32),
}

impl MaterialType {
    /// Map the on-disk value to a material type.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x0 => Self::Texture,
            0x1 => Self::TextureWithGlareMap,
            0x2 => Self::AlphaTextureNoGlare,
            0x3 => Self::AlphaTextureWithOverlap,
            0x4 => Self::TextureWithGlareMap2,
            0x6 => Self::AlphaTextureDoubleSided,
            0x8 => Self::DetalizationObjectGrass,
            0x9 => Self::Fire,
            0x14 => Self::MaterialOnly,
            0x1A => Self::TextureWithDetalizationMap,
            0x1F => Self::DetalizationObjectStone,
            0x20 => Self::TextureWithDetalizationMapWithoutModulation,
            0x22 => Self::TiledTexture,
            0x32 => Self::TextureWithGlareMapAndMask,
            0x35 => Self::TextureWithMask,
            0x3D => Self::Fire2,
            other => Self::Unknown(other),
        }
    }
}

/// How the import policy wants a submesh handled.
///
/// A two-bit set; empty means the submesh is skipped entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportFlags(u32);

impl ImportFlags {
    /// Submesh contributes no objects.
    pub const NONE: Self = Self(0);
    /// Submesh becomes visible geometry.
    pub const VISUAL: Self = Self(1);
    /// Submesh becomes a collision shape.
    pub const COLLIDER: Self = Self(1 << 1);

    /// True if every flag in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ImportFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ImportFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Base names of the textures a submesh references.
///
/// Empty fields mean no texture in that slot. The names are file base names;
/// mapping them to bytes is the job of a [`TextureSource`](crate::TextureSource).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextureRefs {
    pub albedo: String,
    pub specular: String,
    /// Slot with unconfirmed semantics, preserved as stored.
    pub unknown3: String,
    /// Slot with unconfirmed semantics, preserved as stored.
    pub unknown4: String,
}

/// Material parameters stored inline in a submesh record.
///
/// Colors are straight (non-premultiplied) floating-point RGBA with no gamma
/// assumption.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialParams {
    pub diffuse: [f32; 4],
    pub albedo: [f32; 4],
    pub specular: [f32; 4],
    pub emissive: [f32; 4],
    /// Specular exponent.
    pub power: f32,
    pub material_type: MaterialType,
}

/// Geometry buffers of a submesh, present only when the record carries them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Geometry {
    /// Vertex positions, already remapped to Y-up.
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals, same length and remap as `vertices`.
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates, V flipped to bottom-origin.
    pub uvs: Vec<Vec2>,
    /// Triangle corner indices into the vertex arrays, in file order.
    ///
    /// Indices are passed through uninterpreted; a malformed file can
    /// reference past the vertex array and consumers must bounds-check.
    pub triangle_indices: Vec<u16>,
}

impl Geometry {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of whole triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }
}

/// One named geometry+material unit within a model file.
#[derive(Debug, Clone, Serialize)]
pub struct SubMesh {
    pub kind: SubMeshKind,
    /// Display name as stored, e.g. "BODY" or "SHAPE".
    pub name: String,
    pub texture_refs: TextureRefs,
    pub material: MaterialParams,
    /// Animation slot count from the record header; not used by geometry
    /// emission but preserved for callers that handle texel animation.
    pub animation_count: u32,
    /// Present iff the record's flag word is non-zero. Absent means the
    /// submesh is non-renderable.
    pub geometry: Option<Geometry>,
    /// Set by import policy after parsing; empty by default.
    pub import_flags: ImportFlags,
}

impl SubMesh {
    /// Display name normalized the way the classifier expects it:
    /// uppercased, with "?" replaced by "N".
    pub fn nicified_name(&self) -> String {
        self.name.replace('?', "N").to_uppercase()
    }

    /// Read one submesh record from the outer stream.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let raw_kind = reader.read_u32()?;
        let kind = SubMeshKind::from_raw(raw_kind).ok_or_else(|| {
            DecodeError::MalformedRecord(format!("unknown submesh kind {raw_kind}"))
        })?;

        let name = reader.read_fixed_str(NAME_FIELD_WIDTH)?;
        let texture_refs = TextureRefs {
            albedo: reader.read_fixed_str(NAME_FIELD_WIDTH)?,
            specular: reader.read_fixed_str(NAME_FIELD_WIDTH)?,
            unknown3: reader.read_fixed_str(NAME_FIELD_WIDTH)?,
            unknown4: reader.read_fixed_str(NAME_FIELD_WIDTH)?,
        };

        // Historic per-LOD flag bytes, then four reserved u32s. Opaque skips.
        reader.skip(4)?;
        reader.skip(16)?;

        let body_size = reader.read_u32()? as usize;

        // Ten reserved f32s sit between the length field and the body.
        reader.skip(40)?;

        if body_size > reader.remaining() {
            return Err(DecodeError::MalformedRecord(format!(
                "submesh body length {body_size} exceeds remaining {} byte(s)",
                reader.remaining()
            )));
        }

        // The body is self-contained: the outer cursor advances by exactly
        // `body_size` no matter how much of it the nested parse consumes,
        // so a short body cannot desynchronize the following records.
        let mut body = Reader::new(reader.take(body_size)?);

        let animation_count = body.read_u32()?;

        let material = MaterialParams {
            diffuse: body.read_rgba_f32()?,
            albedo: body.read_rgba_f32()?,
            specular: body.read_rgba_f32()?,
            emissive: body.read_rgba_f32()?,
            power: body.read_f32()?,
            material_type: MaterialType::from_raw(body.read_u32()?),
        };

        // Reserved run, consumed verbatim to keep the cursor aligned:
        // texel-animation params (u16, u8, u8, f32), one u32, animation-auto
        // u32 + cycle f32, one f32, two u32, the "triangles x 7" hint,
        // an additional-params u32+f32 pair, and the damage-model count.
        body.skip(48)?;

        // Rotation descriptor: type u32, speed f32, axis 3 x f32. Unused by
        // geometry emission but part of the fixed layout.
        body.skip(20)?;

        let flags = body.read_u32()?;
        let geometry = if flags == 0 {
            // No geometry section; whatever follows in the body is unused.
            None
        } else {
            Some(read_geometry(&mut body, flags)?)
        };

        Ok(SubMesh {
            kind,
            name,
            texture_refs,
            material,
            animation_count,
            geometry,
            import_flags: ImportFlags::NONE,
        })
    }
}

/// Read the geometry section of a submesh body.
///
/// Positions and normals are remapped from the source's Z-up, left-handed
/// frame to Y-up: `(x, y, z) = (raw0, raw2, -raw1)`. V coordinates flip to a
/// bottom-origin convention. If bit 0x4 of `flags` is set, each vertex
/// carries one extra f32 (a wind animation amplitude) between position and
/// normal, consumed but not stored.
fn read_geometry(body: &mut Reader<'_>, flags: u32) -> Result<Geometry> {
    let vertex_count = body.read_u32()? as usize;
    let triangle_count = body.read_u32()? as usize;

    let has_wind = flags & 0x4 != 0;
    let vertex_stride = if has_wind { 36 } else { 32 };

    // Reserve based on what the body can actually hold, so a hostile count
    // cannot force a giant allocation before the reads fail.
    let mut vertices = Vec::with_capacity(vertex_count.min(body.remaining() / vertex_stride + 1));
    let mut normals = Vec::with_capacity(vertices.capacity());
    let mut uvs = Vec::with_capacity(vertices.capacity());

    for _ in 0..vertex_count {
        vertices.push(read_remapped_vec3(body)?);
        if has_wind {
            body.read_f32()?;
        }
        normals.push(read_remapped_vec3(body)?);

        let u = body.read_f32()?;
        let v = body.read_f32()?;
        uvs.push(Vec2::new(u, 1.0 - v));
    }

    let mut triangle_indices =
        Vec::with_capacity(triangle_count.min(body.remaining() / 2 + 1));
    for _ in 0..triangle_count {
        triangle_indices.push(body.read_u16()?);
    }

    Ok(Geometry {
        vertices,
        normals,
        uvs,
        triangle_indices,
    })
}

fn read_remapped_vec3(body: &mut Reader<'_>) -> Result<Vec3> {
    let x = body.read_f32()?;
    let neg_z = body.read_f32()?;
    let y = body.read_f32()?;
    Ok(Vec3::new(x, y, -neg_z))
}
