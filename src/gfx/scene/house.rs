//! The house model
//!
//! Builds the house group: box walls, a four-sided cone roof, a door, two
//! windows on the front face and a ground plane, all at fixed offsets from
//! the group origin.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use super::{
    group::{Group, Shape, ShapeId},
    mesh::Mesh,
    transform::{EulerXyz, Transform},
};
use crate::gfx::{
    geometry::{generate_box, generate_cone, generate_plane},
    resources::material::{Material, MaterialManager},
};

pub const WALL_COLOR: u32 = 0xe0b090;
pub const ROOF_COLOR: u32 = 0xdb7093;
pub const DOOR_COLOR: u32 = 0x8b4513;
pub const WINDOW_COLOR: u32 = 0x87ceeb;
pub const GROUND_COLOR: u32 = 0x3cb371;

pub const WALLS_MATERIAL: &str = "walls";
pub const ROOF_MATERIAL: &str = "roof";
pub const DOOR_MATERIAL: &str = "door";
pub const WINDOW_MATERIAL: &str = "window";
pub const GROUND_MATERIAL: &str = "ground";

const WALL_SIZE: [f32; 3] = [2.0, 1.5, 2.0];
const ROOF_RADIUS: f32 = 1.8;
const ROOF_HEIGHT: f32 = 1.0;
const ROOF_SEGMENTS: u32 = 4;
const DOOR_SIZE: [f32; 3] = [0.5, 0.8, 0.1];
const WINDOW_SIZE: f32 = 0.4;
const GROUND_SIZE: f32 = 20.0;
/// Door and windows sit just proud of the front wall
const FRONT_OFFSET: f32 = 1.01;

/// The house group plus handles to its parts
pub struct House {
    pub group: Group,
    pub walls: ShapeId,
    pub roof: ShapeId,
    pub door: ShapeId,
    pub windows: [ShapeId; 2],
    pub ground: ShapeId,
}

impl House {
    /// Material id of the walls
    pub fn walls_material(&self) -> &str {
        &self.group.shape(self.walls).material_id
    }

    /// Material id of the roof
    pub fn roof_material(&self) -> &str {
        &self.group.shape(self.roof).material_id
    }
}

/// Builds the house, registering its materials in `materials`
pub fn build_house(materials: &mut MaterialManager) -> House {
    let walls_material = materials.add_material(Material::new(WALLS_MATERIAL, WALL_COLOR));
    let roof_material = materials.add_material(Material::new(ROOF_MATERIAL, ROOF_COLOR));
    let door_material = materials.add_material(Material::new(DOOR_MATERIAL, DOOR_COLOR));
    let window_material =
        materials.add_material(Material::new(WINDOW_MATERIAL, WINDOW_COLOR).double_sided());
    let ground_material =
        materials.add_material(Material::new(GROUND_MATERIAL, GROUND_COLOR).double_sided());

    let mut group = Group::new("house");

    let [w, h, d] = WALL_SIZE;
    let walls = group.add(Shape::new(
        "walls",
        Mesh::from_geometry(&generate_box(w, h, d)),
        &walls_material,
        Transform::from_translation(0.0, h * 0.5, 0.0),
    ));

    let roof = group.add(Shape::new(
        "roof",
        Mesh::from_geometry(&generate_cone(ROOF_RADIUS, ROOF_HEIGHT, ROOF_SEGMENTS)),
        &roof_material,
        Transform::from_translation(0.0, h + ROOF_HEIGHT * 0.5, 0.0)
            .with_euler(EulerXyz::new(0.0, FRAC_PI_4, 0.0)),
    ));

    let [dw, dh, dd] = DOOR_SIZE;
    let door = group.add(Shape::new(
        "door",
        Mesh::from_geometry(&generate_box(dw, dh, dd)),
        &door_material,
        Transform::from_translation(0.0, 0.35, FRONT_OFFSET),
    ));

    let window_geometry = generate_plane(WINDOW_SIZE, WINDOW_SIZE, 1, 1);
    let windows = [-0.6, 0.6].map(|x| {
        group.add(Shape::new(
            "window",
            Mesh::from_geometry(&window_geometry),
            &window_material,
            Transform::from_translation(x, 0.8, FRONT_OFFSET),
        ))
    });

    let ground = group.add(Shape::new(
        "ground",
        Mesh::from_geometry(&generate_plane(GROUND_SIZE, GROUND_SIZE, 1, 1)),
        &ground_material,
        Transform::from_translation(0.0, -h * 0.5, 0.0)
            .with_euler(EulerXyz::new(-FRAC_PI_2, 0.0, 0.0)),
    ));

    House {
        group,
        walls,
        roof,
        door,
        windows,
        ground,
    }
}
