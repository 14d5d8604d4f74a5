use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a pointer event.
///
/// Compositors synthesize pointer events from touch sequences for clients
/// that only understand mice; those must not be mistaken for a physical
/// mouse when deciding whether the user is currently touching the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSource {
    Physical,
    SynthesizedFromTouch,
}

impl PointerSource {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, PointerSource::SynthesizedFromTouch)
    }
}

impl fmt::Display for PointerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerSource::Physical => write!(f, "physical"),
            PointerSource::SynthesizedFromTouch => write!(f, "synthesized"),
        }
    }
}

/// An observed input event, already classified by the observer.
///
/// Only the event classes that influence the transient-touch flag are
/// distinguished; everything else collapses into `Other` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    TouchBegin,
    PointerPress { source: PointerSource },
    PointerMove { source: PointerSource },
    Wheel,
    Other,
}

impl InputEvent {
    pub fn physical_press() -> Self {
        InputEvent::PointerPress {
            source: PointerSource::Physical,
        }
    }

    pub fn synthesized_press() -> Self {
        InputEvent::PointerPress {
            source: PointerSource::SynthesizedFromTouch,
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::TouchBegin => write!(f, "touch-begin"),
            InputEvent::PointerPress { source } => write!(f, "pointer-press ({})", source),
            InputEvent::PointerMove { source } => write!(f, "pointer-move ({})", source),
            InputEvent::Wheel => write!(f, "wheel"),
            InputEvent::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_source_classification() {
        assert!(!PointerSource::Physical.is_synthesized());
        assert!(PointerSource::SynthesizedFromTouch.is_synthesized());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            InputEvent::physical_press(),
            InputEvent::PointerPress {
                source: PointerSource::Physical
            }
        );
        assert_eq!(
            InputEvent::synthesized_press(),
            InputEvent::PointerPress {
                source: PointerSource::SynthesizedFromTouch
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(InputEvent::TouchBegin.to_string(), "touch-begin");
        assert_eq!(
            InputEvent::physical_press().to_string(),
            "pointer-press (physical)"
        );
    }
}
