//! House control panel
//!
//! One button per control id plus the keyboard and mouse help text.

use crate::controls::Command;

const HELP_LINES: [&str; 5] = [
    "Drag: rotate house",
    "W / S: camera up / down",
    "A / D: turn house",
    "Z / X or wheel: zoom",
    "Esc: quit",
];

/// Draws the panel and returns the commands clicked this frame
///
/// Buttons are identified by their control id, so captions may repeat
/// without clashing.
pub fn house_control_panel(ui: &imgui::Ui, controls: &[Command]) -> Vec<Command> {
    let mut clicked = Vec::new();

    ui.window("House Controls")
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            let mut section = None;
            for &command in controls {
                let heading = section_heading(command);
                if section != Some(heading) {
                    if section.is_some() {
                        ui.separator();
                    }
                    ui.text(heading);
                    section = Some(heading);
                } else if matches!(command, Command::SetRoofColor(_) | Command::SetWallColor(_)) {
                    ui.same_line();
                }

                if ui.button(button_label(command)) {
                    clicked.push(command);
                }
            }

            ui.separator();
            for line in HELP_LINES {
                ui.text_disabled(line);
            }
        });

    clicked
}

fn section_heading(command: Command) -> &'static str {
    match command {
        Command::SetRoofColor(_) => "Roof",
        Command::SetWallColor(_) => "Walls",
        Command::ToggleWireframe | Command::ResetView => "View",
    }
}

/// Visible caption with the control id as the ImGui id
pub fn button_label(command: Command) -> String {
    format!("{}##{}", command.label(), command.control_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{appearance::resolve_controls, CONTROL_IDS};

    #[test]
    fn labels_carry_the_control_id() {
        let commands = resolve_controls(&CONTROL_IDS).unwrap();
        for (command, id) in commands.into_iter().zip(CONTROL_IDS) {
            let label = button_label(command);
            assert!(label.ends_with(&format!("##{}", id)));
        }
    }

    #[test]
    fn commands_group_into_three_sections() {
        let commands = resolve_controls(&CONTROL_IDS).unwrap();
        let mut headings: Vec<_> = commands.into_iter().map(section_heading).collect();
        headings.dedup();
        assert_eq!(headings, ["Roof", "Walls", "View"]);
    }
}
