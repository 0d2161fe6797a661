//! Turns FBX geometry into GPU-ready triangle lists.

use crate::constants::MODEL_SCALE;
use crate::fbx::{object_name, Document, FbxError, Node};
use fnv::FnvHashMap;
use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error(transparent)]
    Fbx(#[from] FbxError),
    #[error("document has no Objects section")]
    NoObjects,
    #[error("document contains no mesh geometry")]
    NoGeometry,
    #[error("geometry {name:?} is missing {field}")]
    MissingField { name: String, field: &'static str },
    #[error("geometry {name:?} references control point {index} of {count}")]
    IndexOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One renderable piece of a model.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub double_sided: bool,
}

impl MeshPart {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bake `m` into the vertices. Normals use the inverse transpose so
    /// non-uniform scaling keeps them perpendicular.
    pub fn transform(&mut self, m: Mat4) {
        let normal_matrix = Mat3::from_mat4(m).inverse().transpose();
        for v in &mut self.vertices {
            v.position = m.transform_point3(Vec3::from(v.position)).to_array();
            v.normal = (normal_matrix * Vec3::from(v.normal))
                .normalize_or_zero()
                .to_array();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

/// Loaded model: every mesh part plus the uniform scale applied when drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelGroup {
    pub parts: Vec<MeshPart>,
    pub scale: f32,
}

impl ModelGroup {
    /// Decode a binary FBX file and prepare it for display.
    pub fn from_fbx(bytes: &[u8]) -> Result<Self, MeshError> {
        let doc = Document::parse(bytes)?;
        let parts = extract_parts(&doc)?;
        let mut group = Self { parts, scale: 1.0 };
        group.prepare_for_display();
        log::info!(
            "[fbx] version={} parts={} triangles={}",
            doc.version,
            group.parts.len(),
            group.triangle_count()
        );
        Ok(group)
    }

    /// Fit the model to the view and give every part shadows and a
    /// double-sided surface, ready for the shared texture.
    pub fn prepare_for_display(&mut self) {
        self.scale = MODEL_SCALE;
        for part in &mut self.parts {
            part.cast_shadow = true;
            part.receive_shadow = true;
            part.double_sided = true;
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(MeshPart::triangle_count).sum()
    }

    /// Bounds in model space, before scaling. `None` for an empty model.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut it = self.parts.iter().flat_map(|p| p.vertices.iter());
        let first = Vec3::from(it.next()?.position);
        let (min, max) = it.fold((first, first), |(lo, hi), v| {
            let p = Vec3::from(v.position);
            (lo.min(p), hi.max(p))
        });
        Some(Bounds { min, max })
    }

    /// World matrix for a group spun `angle` radians about +Y.
    pub fn model_matrix(&self, angle: f32) -> Mat4 {
        Mat4::from_rotation_y(angle) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Extract every `Geometry` node of class `Mesh`. A geometry connected to a
/// `Model` is placed by that model's `Lcl` translation, rotation and scaling.
pub fn extract_parts(doc: &Document) -> Result<Vec<MeshPart>, MeshError> {
    let objects = doc.node("Objects").ok_or(MeshError::NoObjects)?;
    let models = model_transforms(objects);
    let owners = geometry_owners(doc);
    let mut parts = Vec::new();
    for geometry in objects
        .children_named("Geometry")
        .filter(|g| g.prop(2).and_then(|p| p.as_str()) == Some("Mesh"))
    {
        let mut part = geometry_to_part(geometry)?;
        let local = geometry
            .prop(0)
            .and_then(|p| p.as_i64())
            .and_then(|id| owners.get(&id))
            .and_then(|model| models.get(model));
        if let Some(m) = local {
            part.transform(*m);
        }
        parts.push(part);
    }
    if parts.is_empty() {
        return Err(MeshError::NoGeometry);
    }
    Ok(parts)
}

/// `Lcl` transform of every `Model` object, keyed by object id. Rotation is
/// in degrees, applied X then Y then Z.
fn model_transforms(objects: &Node) -> FnvHashMap<i64, Mat4> {
    let mut out = FnvHashMap::default();
    for model in objects.children_named("Model") {
        let Some(id) = model.prop(0).and_then(|p| p.as_i64()) else {
            continue;
        };
        let mut translation = Vec3::ZERO;
        let mut rotation = Vec3::ZERO;
        let mut scaling = Vec3::ONE;
        for p in model
            .child("Properties70")
            .into_iter()
            .flat_map(|props| props.children_named("P"))
        {
            let Some(v) = vec3_property(p) else {
                continue;
            };
            match p.prop(0).and_then(|n| n.as_str()) {
                Some("Lcl Translation") => translation = v,
                Some("Lcl Rotation") => rotation = v,
                Some("Lcl Scaling") => scaling = v,
                _ => {}
            }
        }
        let r = Mat4::from_rotation_z(rotation.z.to_radians())
            * Mat4::from_rotation_y(rotation.y.to_radians())
            * Mat4::from_rotation_x(rotation.x.to_radians());
        out.insert(
            id,
            Mat4::from_translation(translation) * r * Mat4::from_scale(scaling),
        );
    }
    out
}

/// `P` records carry name, type, label and flags, then the value.
fn vec3_property(p: &Node) -> Option<Vec3> {
    let x = p.prop(4)?.as_f64()?;
    let y = p.prop(5)?.as_f64()?;
    let z = p.prop(6)?.as_f64()?;
    Some(Vec3::new(x as f32, y as f32, z as f32))
}

/// Object-to-object links from `Connections`: child id to parent id.
fn geometry_owners(doc: &Document) -> FnvHashMap<i64, i64> {
    doc.node("Connections")
        .into_iter()
        .flat_map(|c| c.children_named("C"))
        .filter(|c| c.prop(0).and_then(|p| p.as_str()) == Some("OO"))
        .filter_map(|c| Some((c.prop(1)?.as_i64()?, c.prop(2)?.as_i64()?)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mapping {
    ByPolygonVertex,
    ByControlPoint,
    ByPolygon,
    AllSame,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Reference {
    Direct,
    IndexToDirect,
}

/// A `LayerElement*` block: per-something data plus how to look it up.
struct Layer {
    mapping: Mapping,
    reference: Reference,
    data: Vec<f64>,
    index: Vec<i32>,
    stride: usize,
}

impl Layer {
    fn read(geometry: &Node, element: &str, data: &str, index: &str, stride: usize) -> Option<Self> {
        let el = geometry.child(element)?;
        let mapping = match el.field("MappingInformationType")?.as_str()? {
            "ByPolygonVertex" => Mapping::ByPolygonVertex,
            "ByVertex" | "ByVertice" | "ByControlPoint" => Mapping::ByControlPoint,
            "ByPolygon" => Mapping::ByPolygon,
            "AllSame" => Mapping::AllSame,
            other => {
                log::warn!("[fbx] unsupported {element} mapping {other:?}");
                return None;
            }
        };
        let reference = match el.field("ReferenceInformationType").and_then(|p| p.as_str()) {
            Some("IndexToDirect") | Some("Index") => Reference::IndexToDirect,
            _ => Reference::Direct,
        };
        let values = el.field(data)?.to_f64_vec()?;
        let idx = el
            .field(index)
            .and_then(|p| p.to_i32_vec())
            .unwrap_or_default();
        Some(Self {
            mapping,
            reference,
            data: values,
            index: idx,
            stride,
        })
    }

    fn get(&self, polygon_vertex: usize, control_point: usize, polygon: usize) -> Option<&[f64]> {
        let i = match self.mapping {
            Mapping::ByPolygonVertex => polygon_vertex,
            Mapping::ByControlPoint => control_point,
            Mapping::ByPolygon => polygon,
            Mapping::AllSame => 0,
        };
        let di = match self.reference {
            Reference::Direct => i,
            Reference::IndexToDirect => usize::try_from(*self.index.get(i)?).ok()?,
        };
        self.data.get(di * self.stride..di * self.stride + self.stride)
    }
}

fn geometry_to_part(geometry: &Node) -> Result<MeshPart, MeshError> {
    let name = geometry
        .prop(1)
        .and_then(|p| p.as_str())
        .map(object_name)
        .unwrap_or("Geometry")
        .to_string();
    let missing = |field| MeshError::MissingField {
        name: name.clone(),
        field,
    };
    let points = geometry
        .field("Vertices")
        .and_then(|p| p.to_f64_vec())
        .ok_or_else(|| missing("Vertices"))?;
    let poly_index = geometry
        .field("PolygonVertexIndex")
        .and_then(|p| p.to_i32_vec())
        .ok_or_else(|| missing("PolygonVertexIndex"))?;
    let control_points: Vec<[f32; 3]> = points
        .chunks_exact(3)
        .map(|c| [c[0] as f32, c[1] as f32, c[2] as f32])
        .collect();

    let normals = Layer::read(geometry, "LayerElementNormal", "Normals", "NormalsIndex", 3);
    let uvs = Layer::read(geometry, "LayerElementUV", "UV", "UVIndex", 2);

    let mut vertices = Vec::with_capacity(poly_index.len());
    let mut needs_flat = Vec::with_capacity(poly_index.len());
    let mut indices = Vec::with_capacity(poly_index.len() * 3 / 2);
    let mut polygon_start = 0usize;
    let mut polygon = 0usize;
    for (pv, &raw) in poly_index.iter().enumerate() {
        // a negative index marks the last corner of a polygon, stored as !index
        let closes = raw < 0;
        let cp = (if closes { !raw } else { raw }) as usize;
        let position = *control_points
            .get(cp)
            .ok_or_else(|| MeshError::IndexOutOfRange {
                name: name.clone(),
                index: cp,
                count: control_points.len(),
            })?;
        let normal = normals
            .as_ref()
            .and_then(|l| l.get(pv, cp, polygon))
            .map(|n| [n[0] as f32, n[1] as f32, n[2] as f32]);
        needs_flat.push(normal.is_none());
        let normal = normal.unwrap_or([0.0; 3]);
        let uv = uvs
            .as_ref()
            .and_then(|l| l.get(pv, cp, polygon))
            .map(|t| [t[0] as f32, 1.0 - t[1] as f32])
            .unwrap_or([0.0; 2]);
        vertices.push(MeshVertex {
            position,
            normal,
            uv,
        });
        if closes {
            let first = polygon_start as u32;
            for k in (polygon_start + 1)..pv {
                indices.extend_from_slice(&[first, k as u32, k as u32 + 1]);
            }
            polygon_start = pv + 1;
            polygon += 1;
        }
    }
    // drop an unterminated trailing polygon
    vertices.truncate(polygon_start);
    needs_flat.truncate(polygon_start);

    if needs_flat.iter().any(|&f| f) {
        apply_flat_normals(&mut vertices, &indices, &needs_flat);
    }

    Ok(MeshPart {
        name,
        vertices,
        indices,
        cast_shadow: false,
        receive_shadow: false,
        double_sided: false,
    })
}

/// Give each flagged triangle corner its face normal. Corners shared by
/// several triangles of one polygon end up with the last face's normal, which
/// is the same for planar polygons.
fn apply_flat_normals(vertices: &mut [MeshVertex], indices: &[u32], flagged: &[bool]) {
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from(vertices[a].position);
        let pb = Vec3::from(vertices[b].position);
        let pc = Vec3::from(vertices[c].position);
        let n = (pb - pa).cross(pc - pa).normalize_or_zero().to_array();
        for i in [a, b, c] {
            if flagged[i] {
                vertices[i].normal = n;
            }
        }
    }
}
