//! JSON event scripts for headless replay.
//!
//! A script is an array of tagged objects, e.g.
//! `[{"type":"pointer_down","x":0,"y":0,"side":0}, {"type":"button","action":"increase_ab"}]`.
//! Shape selection appears either as a button action or as its own
//! `select_shape` event.

use anyhow::{anyhow, Result};
use quadedit::editor::{Action, InputEvent, OutputEvent};
use quadedit::geom::Side;
use quadedit::model::ShapeVariant;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        side: Option<usize>,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerLeave,
    Button {
        action: String,
        #[serde(default)]
        degrees: Option<f64>,
    },
    SelectShape {
        shape: String,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

fn parse_shape(name: &str) -> Result<ShapeVariant> {
    ShapeVariant::parse(name).ok_or_else(|| anyhow!("unknown shape {name:?}"))
}

fn parse_action(action: &str, degrees: Option<f64>) -> Result<Action> {
    let need_degrees = || degrees.ok_or_else(|| anyhow!("action {action:?} needs \"degrees\""));
    Ok(match action {
        "increase_ab" => Action::IncreaseAb,
        "decrease_ab" => Action::DecreaseAb,
        "increase_ad" => Action::IncreaseAd,
        "decrease_ad" => Action::DecreaseAd,
        "reset" => Action::Reset,
        "set_angles_ac" => Action::SetAnglesAc(need_degrees()?),
        "set_angles_bd" => Action::SetAnglesBd(need_degrees()?),
        other => match other.strip_prefix("select_") {
            Some(shape) => Action::SelectShape(parse_shape(shape)?),
            None => return Err(anyhow!("unknown action {other:?}")),
        },
    })
}

impl ScriptEvent {
    pub fn to_input(&self) -> Result<InputEvent> {
        Ok(match self {
            ScriptEvent::PointerDown { x, y, side } => {
                let side = match side {
                    Some(i) => Some(
                        Side::from_index(*i).ok_or_else(|| anyhow!("side index {i} out of range"))?,
                    ),
                    None => None,
                };
                InputEvent::PointerDown { x: *x, y: *y, side }
            }
            ScriptEvent::PointerMove { x, y } => InputEvent::PointerMove { x: *x, y: *y },
            ScriptEvent::PointerUp => InputEvent::PointerUp,
            ScriptEvent::PointerLeave => InputEvent::PointerLeave,
            ScriptEvent::Button { action, degrees } => {
                InputEvent::Button(parse_action(action, *degrees)?)
            }
            ScriptEvent::SelectShape { shape } => {
                InputEvent::Button(Action::SelectShape(parse_shape(shape)?))
            }
            ScriptEvent::Resize { width, height } => InputEvent::Resize {
                width: *width,
                height: *height,
            },
        })
    }
}

pub fn parse_script(text: &str) -> Result<Vec<InputEvent>> {
    let events: Vec<ScriptEvent> = serde_json::from_str(text)?;
    events.iter().map(ScriptEvent::to_input).collect()
}

/// JSON form of an output event for the replay log.
pub fn output_json(out: &OutputEvent) -> Value {
    match out {
        OutputEvent::GeometryChanged { vertices, angles } => json!({
            "type": "geometry_changed",
            "vertices": vertices.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
            "angles": angles,
        }),
        OutputEvent::Clamped => json!({ "type": "clamped" }),
        OutputEvent::AnchorChanged(side) => json!({
            "type": "anchor_changed",
            "side": side.map(|s| s.index()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_event_kind() {
        let text = r#"[
            {"type":"select_shape","shape":"trapezium"},
            {"type":"pointer_down","x":10,"y":20,"side":2},
            {"type":"pointer_move","x":12.5,"y":30},
            {"type":"pointer_up"},
            {"type":"pointer_leave"},
            {"type":"button","action":"increase_ab"},
            {"type":"button","action":"set_angles_bd","degrees":100},
            {"type":"button","action":"select_rhombus"},
            {"type":"resize","width":800,"height":600}
        ]"#;
        let events = parse_script(text).unwrap();
        assert_eq!(events.len(), 9);
        assert_eq!(
            events[0],
            InputEvent::Button(Action::SelectShape(ShapeVariant::Trapezium))
        );
        assert_eq!(
            events[1],
            InputEvent::PointerDown {
                x: 10.0,
                y: 20.0,
                side: Some(Side::Cd)
            }
        );
        assert_eq!(events[6], InputEvent::Button(Action::SetAnglesBd(100.0)));
        assert_eq!(
            events[7],
            InputEvent::Button(Action::SelectShape(ShapeVariant::Rhombus))
        );
    }

    #[test]
    fn pointer_down_without_side_is_a_miss() {
        let events = parse_script(r#"[{"type":"pointer_down","x":1,"y":2}]"#).unwrap();
        assert_eq!(
            events[0],
            InputEvent::PointerDown {
                x: 1.0,
                y: 2.0,
                side: None
            }
        );
    }

    #[test]
    fn bad_scripts_are_errors() {
        assert!(parse_script(r#"[{"type":"button","action":"explode"}]"#).is_err());
        assert!(parse_script(r#"[{"type":"select_shape","shape":"kite"}]"#).is_err());
        assert!(parse_script(r#"[{"type":"pointer_down","x":0,"y":0,"side":4}]"#).is_err());
        assert!(parse_script(r#"[{"type":"button","action":"set_angles_ac"}]"#).is_err());
        assert!(parse_script(r#"{"type":"pointer_up"}"#).is_err());
    }

    #[test]
    fn outputs_serialize_with_tags() {
        assert_eq!(output_json(&OutputEvent::Clamped)["type"], "clamped");
        let anchor = output_json(&OutputEvent::AnchorChanged(Some(Side::Cd)));
        assert_eq!(anchor["side"], 2);
        let cleared = output_json(&OutputEvent::AnchorChanged(None));
        assert!(cleared["side"].is_null());
    }
}
