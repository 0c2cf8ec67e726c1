//! Software rasterizer for occupancy grids.
//!
//! Voxels are drawn with an orthographic camera, z up. Only faces between an
//! occupied cell and an empty (or out-of-grid) cell are emitted; back faces
//! are culled and the rest are painted far to near, each filled with a shaded
//! face colour and outlined with the edge colour.

use crate::config::Settings;
use crate::error::AppError;
use glam::{Vec2, Vec3};
use voxel_core::{IndexMesh, OccupancyGrid};

/// Fraction of the shorter frame side covered by the grid's bounding sphere.
const FIT_MARGIN: f32 = 0.9;

/// Largest accepted frame width or height in pixels.
pub const MAX_FRAME_SIDE: usize = 16384;

/// An occupancy grid together with the mesh locating its voxel corners.
#[derive(Debug, Clone)]
pub struct VoxelScene {
    pub grid: OccupancyGrid,
    pub mesh: IndexMesh,
}

impl VoxelScene {
    pub fn new(grid: OccupancyGrid) -> Self {
        let mesh = IndexMesh::for_grid(&grid);
        Self { grid, mesh }
    }

    fn center(&self) -> Vec3 {
        let (w, h, d) = self.grid.dimensions();
        Vec3::new(w as f32, h as f32, d as f32) * 0.5
    }
}

/// Orbit camera looking at the grid centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation around the z axis, in degrees.
    pub azimuth: f32,
    /// Angle above the xy plane, in degrees, within `[-90, 90]`.
    pub elevation: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

impl Camera {
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        let mut camera = Self {
            azimuth: 0.0,
            elevation: 0.0,
        };
        camera.rotate(azimuth, elevation);
        camera
    }

    /// Rotates the camera, wrapping azimuth into `(-180, 180]` and clamping
    /// elevation.
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        let mut azimuth = (self.azimuth + d_azimuth).rem_euclid(360.0);
        if azimuth > 180.0 {
            azimuth -= 360.0;
        }
        self.azimuth = azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-90.0, 90.0);
    }

    /// Returns `(right, up, towards_eye)` unit vectors in world space.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();
        let towards_eye = Vec3::new(cos_el * cos_az, cos_el * sin_az, sin_el);
        let right = Vec3::new(-sin_az, cos_az, 0.0);
        let up = towards_eye.cross(right);
        (right, up, towards_eye)
    }
}

/// Colours used when rasterizing, as `0x00RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub face_color: u32,
    pub edge_color: u32,
    pub background: u32,
    pub axes_color: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            face_color: 0x001f_77b4,
            edge_color: 0x0000_0000,
            background: 0x00ff_ffff,
            axes_color: 0x00c8_c8c8,
        }
    }
}

impl RenderStyle {
    /// Builds the style from the configured face and edge colours.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        Ok(Self {
            face_color: parse_hex_color(&settings.face_color)?,
            edge_color: parse_hex_color(&settings.edge_color)?,
            ..Self::default()
        })
    }
}

/// Parses `#rrggbb` (the `#` is optional) into `0x00RRGGBB`.
pub fn parse_hex_color(text: &str) -> Result<u32, AppError> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::Config(format!(
            "Invalid colour {text:?}, expected #rrggbb"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|e| AppError::Config(format!("Invalid colour {text:?}: {e}")))
}

/// A rendered image of `0x00RRGGBB` pixels, row-major from the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// Creates a frame filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if either side is zero or larger than
    /// [`MAX_FRAME_SIDE`].
    pub fn new(width: usize, height: usize, fill: u32) -> Result<Self, AppError> {
        let side_ok = |side: usize| (1..=MAX_FRAME_SIDE).contains(&side);
        let len = (side_ok(width) && side_ok(height))
            .then(|| width.checked_mul(height))
            .flatten()
            .ok_or_else(|| {
                AppError::Config(format!(
                    "Frame size {width}x{height} is outside 1..={MAX_FRAME_SIDE} per side"
                ))
            })?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; len],
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    fn put(&mut self, x: i64, y: i64, color: u32) {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < self.width && y < self.height {
                self.pixels[y * self.width + x] = color;
            }
        }
    }

    /// Bresenham line between two points, clipped to the frame.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
        let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Scanline fill of a polygon, sampling at pixel centres.
    fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }

        let first_row = (min_y - 0.5).ceil().max(0.0) as i64;
        let last_row = (max_y - 0.5).floor().min(self.height as f32 - 1.0) as i64;
        let mut crossings = Vec::with_capacity(points.len());

        for row in first_row..=last_row {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).floor() as i64;
                for col in start..=end {
                    self.put(col, row, color);
                }
            }
        }
    }
}

/// Face normals and the corner indices (into `IndexMesh::voxel_corners`)
/// of each face, in perimeter order.
const FACES: [([i8; 3], [usize; 4]); 6] = [
    ([-1, 0, 0], [0, 2, 6, 4]),
    ([1, 0, 0], [1, 3, 7, 5]),
    ([0, -1, 0], [0, 1, 5, 4]),
    ([0, 1, 0], [2, 3, 7, 6]),
    ([0, 0, -1], [0, 1, 3, 2]),
    ([0, 0, 1], [4, 5, 7, 6]),
];

/// A visible face ready to be painted.
struct Quad {
    depth: f32,
    corners: [Vec2; 4],
    color: u32,
}

/// Maps world positions to frame pixels for one camera and frame size.
struct Projector {
    center: Vec3,
    right: Vec3,
    up: Vec3,
    towards_eye: Vec3,
    scale: f32,
    origin: Vec2,
}

impl Projector {
    fn new(scene: &VoxelScene, camera: &Camera, width: usize, height: usize) -> Self {
        let (right, up, towards_eye) = camera.basis();
        let center = scene.center();
        let radius = center.length().max(0.5);
        let scale = FIT_MARGIN * width.min(height) as f32 / (2.0 * radius);
        Self {
            center,
            right,
            up,
            towards_eye,
            scale,
            origin: Vec2::new(width as f32 * 0.5, height as f32 * 0.5),
        }
    }

    fn project(&self, point: Vec3) -> Vec2 {
        let rel = point - self.center;
        Vec2::new(
            self.origin.x + rel.dot(self.right) * self.scale,
            self.origin.y - rel.dot(self.up) * self.scale,
        )
    }

    fn depth(&self, point: Vec3) -> f32 {
        (point - self.center).dot(self.towards_eye)
    }
}

/// Renders `scene` into a new frame of the given size.
///
/// # Errors
///
/// Returns `AppError::Config` if the frame size is not accepted by [`Frame::new`].
pub fn render_scene(
    scene: &VoxelScene,
    camera: &Camera,
    style: &RenderStyle,
    width: usize,
    height: usize,
) -> Result<Frame, AppError> {
    let mut frame = Frame::new(width, height, style.background)?;
    let projector = Projector::new(scene, camera, width, height);

    draw_bounding_box(&mut frame, scene, &projector, style.axes_color);

    let mut quads = collect_visible_faces(scene, &projector, style);
    quads.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    log::trace!("Painting {} visible faces", quads.len());

    for quad in &quads {
        frame.fill_polygon(&quad.corners, quad.color);
        for i in 0..quad.corners.len() {
            let next = quad.corners[(i + 1) % quad.corners.len()];
            frame.draw_line(quad.corners[i], next, style.edge_color);
        }
    }

    Ok(frame)
}

fn collect_visible_faces(
    scene: &VoxelScene,
    projector: &Projector,
    style: &RenderStyle,
) -> Vec<Quad> {
    let light = (projector.towards_eye + projector.up).normalize();
    let grid = &scene.grid;
    let mut quads = Vec::new();

    for voxel in grid.iter_occupied() {
        let Some(corners) = scene.mesh.voxel_corners(voxel.x, voxel.y, voxel.z) else {
            continue;
        };
        let corners = corners.map(|[u, v, w]| Vec3::new(u as f32, v as f32, w as f32));

        for (normal, indices) in FACES {
            let n = Vec3::new(f32::from(normal[0]), f32::from(normal[1]), f32::from(normal[2]));
            if n.dot(projector.towards_eye) <= 0.0 {
                continue;
            }
            if neighbour_is_occupied(grid, voxel.to_array(), normal) {
                continue;
            }

            let face = indices.map(|i| corners[i]);
            let centroid = (face[0] + face[1] + face[2] + face[3]) * 0.25;
            let intensity = 0.55 + 0.45 * n.dot(light).max(0.0);
            quads.push(Quad {
                depth: projector.depth(centroid),
                corners: face.map(|p| projector.project(p)),
                color: shade(style.face_color, intensity),
            });
        }
    }

    quads
}

fn neighbour_is_occupied(grid: &OccupancyGrid, [x, y, z]: [usize; 3], offset: [i8; 3]) -> bool {
    let step = |value: usize, delta: i8| value.checked_add_signed(isize::from(delta));
    match (step(x, offset[0]), step(y, offset[1]), step(z, offset[2])) {
        (Some(nx), Some(ny), Some(nz)) => grid.is_occupied(nx, ny, nz),
        _ => false,
    }
}

fn draw_bounding_box(frame: &mut Frame, scene: &VoxelScene, projector: &Projector, color: u32) {
    let (w, h, d) = scene.grid.dimensions();
    let size = Vec3::new(w as f32, h as f32, d as f32);
    let corner = |bits: usize| {
        Vec3::new(
            if bits & 1 == 1 { size.x } else { 0.0 },
            if bits & 2 == 2 { size.y } else { 0.0 },
            if bits & 4 == 4 { size.z } else { 0.0 },
        )
    };

    for a in 0..8usize {
        for axis in [1usize, 2, 4] {
            if a & axis == 0 {
                let from = projector.project(corner(a));
                let to = projector.project(corner(a | axis));
                frame.draw_line(from, to, color);
            }
        }
    }
}

fn shade(color: u32, intensity: f32) -> u32 {
    let channel = |shift: u32| {
        let value = ((color >> shift) & 0xff) as f32 * intensity.clamp(0.0, 1.0);
        (value.round() as u32).min(0xff) << shift
    };
    channel(16) | channel(8) | channel(0)
}
