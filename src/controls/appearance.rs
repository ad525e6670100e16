//! Color swaps and the wireframe toggle
//!
//! Every UI control id resolves to exactly one [`Command`]. Style commands
//! overwrite material state unconditionally.

use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    error::ViewerError,
    gfx::{resources::material::MaterialManager, scene::house::House},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofColor {
    Pink,
    Blue,
    Green,
}

impl RoofColor {
    pub fn hex(self) -> u32 {
        match self {
            RoofColor::Pink => 0xdb7093,
            RoofColor::Blue => 0x4444ff,
            RoofColor::Green => 0x44ff44,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallColor {
    Beige,
    Gray,
    Yellow,
}

impl WallColor {
    pub fn hex(self) -> u32 {
        match self {
            WallColor::Beige => 0xe0b090,
            WallColor::Gray => 0xb0b0b0,
            WallColor::Yellow => 0xffff80,
        }
    }
}

/// Action bound to a control panel button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetRoofColor(RoofColor),
    SetWallColor(WallColor),
    ToggleWireframe,
    ResetView,
}

/// Control ids in panel order
pub const CONTROL_IDS: [&str; 8] = [
    "roof-pink",
    "roof-blue",
    "roof-green",
    "wall-beige",
    "wall-gray",
    "wall-yellow",
    "toggle-wireframe",
    "reset-view",
];

impl Command {
    pub fn control_id(self) -> &'static str {
        match self {
            Command::SetRoofColor(RoofColor::Pink) => "roof-pink",
            Command::SetRoofColor(RoofColor::Blue) => "roof-blue",
            Command::SetRoofColor(RoofColor::Green) => "roof-green",
            Command::SetWallColor(WallColor::Beige) => "wall-beige",
            Command::SetWallColor(WallColor::Gray) => "wall-gray",
            Command::SetWallColor(WallColor::Yellow) => "wall-yellow",
            Command::ToggleWireframe => "toggle-wireframe",
            Command::ResetView => "reset-view",
        }
    }

    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            Command::SetRoofColor(RoofColor::Pink) => "Pink Roof",
            Command::SetRoofColor(RoofColor::Blue) => "Blue Roof",
            Command::SetRoofColor(RoofColor::Green) => "Green Roof",
            Command::SetWallColor(WallColor::Beige) => "Beige Walls",
            Command::SetWallColor(WallColor::Gray) => "Gray Walls",
            Command::SetWallColor(WallColor::Yellow) => "Yellow Walls",
            Command::ToggleWireframe => "Toggle Wireframe",
            Command::ResetView => "Reset View",
        }
    }
}

impl FromStr for Command {
    type Err = ViewerError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let command = match id {
            "roof-pink" => Command::SetRoofColor(RoofColor::Pink),
            "roof-blue" => Command::SetRoofColor(RoofColor::Blue),
            "roof-green" => Command::SetRoofColor(RoofColor::Green),
            "wall-beige" => Command::SetWallColor(WallColor::Beige),
            "wall-gray" => Command::SetWallColor(WallColor::Gray),
            "wall-yellow" => Command::SetWallColor(WallColor::Yellow),
            "toggle-wireframe" => Command::ToggleWireframe,
            "reset-view" => Command::ResetView,
            other => return Err(ViewerError::UnknownControl(other.to_string())),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.control_id())
    }
}

/// Resolves every panel control id, failing on the first unknown one
pub fn resolve_controls(ids: &[&str]) -> Result<Vec<Command>, ViewerError> {
    ids.iter().map(|id| id.parse()).collect()
}

pub fn set_roof_color(materials: &mut MaterialManager, house: &House, color: RoofColor) {
    if let Some(material) = materials.get_material_mut(house.roof_material()) {
        material.set_color(color.hex());
        debug!("Roof color set to {:06x}", color.hex());
    }
}

pub fn set_wall_color(materials: &mut MaterialManager, house: &House, color: WallColor) {
    if let Some(material) = materials.get_material_mut(house.walls_material()) {
        material.set_color(color.hex());
        debug!("Wall color set to {:06x}", color.hex());
    }
}

/// Flips wireframe on the walls and roof materials
pub fn toggle_wireframe(materials: &mut MaterialManager, house: &House) {
    for id in [house.walls_material(), house.roof_material()] {
        if let Some(material) = materials.get_material_mut(id) {
            material.wireframe = !material.wireframe;
            debug!("Wireframe on '{}': {}", id, material.wireframe);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::house::{build_house, DOOR_MATERIAL, GROUND_MATERIAL, WINDOW_MATERIAL};

    fn setup() -> (MaterialManager, House) {
        let mut materials = MaterialManager::new();
        let house = build_house(&mut materials);
        (materials, house)
    }

    fn wireframe(materials: &MaterialManager, id: &str) -> bool {
        materials.get_material(id).unwrap().wireframe
    }

    #[test]
    fn every_control_id_resolves_and_round_trips() {
        let commands = resolve_controls(&CONTROL_IDS).unwrap();
        assert_eq!(commands.len(), 8);
        for (command, id) in commands.iter().zip(CONTROL_IDS) {
            assert_eq!(command.control_id(), id);
            assert_eq!(command.to_string(), id);
        }
    }

    #[test]
    fn unknown_control_is_an_error() {
        let err = resolve_controls(&["roof-pink", "roof-purple"]).unwrap_err();
        assert!(matches!(err, ViewerError::UnknownControl(ref id) if id == "roof-purple"));
    }

    #[test]
    fn roof_blue_then_wireframe() {
        let (mut materials, house) = setup();
        set_roof_color(&mut materials, &house, RoofColor::Blue);
        toggle_wireframe(&mut materials, &house);

        let roof = materials.get_material(house.roof_material()).unwrap();
        assert_eq!(roof.color, 0x4444ff);
        assert!(roof.wireframe);
        assert!(wireframe(&materials, house.walls_material()));
    }

    #[test]
    fn toggling_twice_restores_and_never_touches_other_parts() {
        let (mut materials, house) = setup();
        toggle_wireframe(&mut materials, &house);
        for id in [DOOR_MATERIAL, WINDOW_MATERIAL, GROUND_MATERIAL] {
            assert!(!wireframe(&materials, id));
        }

        toggle_wireframe(&mut materials, &house);
        assert!(!wireframe(&materials, house.walls_material()));
        assert!(!wireframe(&materials, house.roof_material()));
    }

    #[test]
    fn wall_color_overwrites_and_leaves_roof_alone() {
        let (mut materials, house) = setup();
        set_wall_color(&mut materials, &house, WallColor::Yellow);
        set_wall_color(&mut materials, &house, WallColor::Yellow);
        assert_eq!(materials.get_material(house.walls_material()).unwrap().color, 0xffff80);
        assert_eq!(materials.get_material(house.roof_material()).unwrap().color, 0xdb7093);

        set_wall_color(&mut materials, &house, WallColor::Gray);
        assert_eq!(materials.get_material(house.walls_material()).unwrap().color, 0xb0b0b0);
    }
}
