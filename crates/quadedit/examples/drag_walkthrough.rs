//! Scripted walkthrough of the editor for each shape variant.
//!
//! Purpose
//! - Show the event flow a host UI drives: select a shape, drag a side,
//!   release, press a length button, and print what the display layer would
//!   receive (vertices, angles, clamp signals).

use quadedit::prelude::*;

fn main() {
    for variant in ShapeVariant::ALL {
        let mut editor = Editor::default();
        println!("== {}", variant.name());
        let script = [
            InputEvent::Button(Action::SelectShape(variant)),
            InputEvent::PointerDown {
                x: 0.0,
                y: 0.0,
                side: Some(Side::Ab),
            },
            InputEvent::PointerMove { x: 30.0, y: 25.0 },
            InputEvent::PointerMove { x: 60.0, y: 40.0 },
            InputEvent::PointerUp,
            InputEvent::Button(Action::IncreaseAb),
        ];
        for event in script {
            for out in editor.handle(event) {
                match out {
                    OutputEvent::GeometryChanged { vertices, angles } => {
                        let pts: Vec<String> = vertices
                            .iter()
                            .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                            .collect();
                        println!("  {:?} -> [{}] angles {:?}", event, pts.join(", "), angles);
                    }
                    OutputEvent::Clamped => println!("  {:?} -> clamped", event),
                    OutputEvent::AnchorChanged(side) => {
                        println!("  {:?} -> anchored {:?}", event, side)
                    }
                }
            }
        }
    }
}
