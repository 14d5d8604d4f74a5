use crate::events::{InputEvent, PointerSource};
use crate::utils::device_finder::DeviceClass;
use evdev::{EventType, KeyCode, RelativeAxisCode};

/// Classify one raw evdev event into the input-event vocabulary the
/// settings service understands.
///
/// Pointer-looking events coming from a touch-screen device are the
/// compositor's synthesized mouse stream and are tagged as such; only a
/// genuine pointer device yields `PointerSource::Physical`.
pub fn classify_event(
    event_type: EventType,
    code: u16,
    value: i32,
    device: DeviceClass,
) -> InputEvent {
    if event_type == EventType::KEY {
        classify_key(code, value, device)
    } else if event_type == EventType::RELATIVE {
        classify_relative(code, device)
    } else {
        InputEvent::Other
    }
}

fn classify_key(code: u16, value: i32, device: DeviceClass) -> InputEvent {
    // Releases never influence the transient-touch flag.
    if value != 1 {
        return InputEvent::Other;
    }

    if code == KeyCode::BTN_TOUCH.code() {
        return match device {
            DeviceClass::TouchScreen => InputEvent::TouchBegin,
            DeviceClass::Pointer => InputEvent::Other,
        };
    }

    if (KeyCode::BTN_LEFT.code()..=KeyCode::BTN_TASK.code()).contains(&code) {
        return InputEvent::PointerPress {
            source: pointer_source(device),
        };
    }

    InputEvent::Other
}

fn classify_relative(code: u16, device: DeviceClass) -> InputEvent {
    if code == RelativeAxisCode::REL_WHEEL.0
        || code == RelativeAxisCode::REL_HWHEEL.0
        || code == RelativeAxisCode::REL_WHEEL_HI_RES.0
        || code == RelativeAxisCode::REL_HWHEEL_HI_RES.0
    {
        return InputEvent::Wheel;
    }

    if code == RelativeAxisCode::REL_X.0 || code == RelativeAxisCode::REL_Y.0 {
        return InputEvent::PointerMove {
            source: pointer_source(device),
        };
    }

    InputEvent::Other
}

fn pointer_source(device: DeviceClass) -> PointerSource {
    match device {
        DeviceClass::TouchScreen => PointerSource::SynthesizedFromTouch,
        DeviceClass::Pointer => PointerSource::Physical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_begin_only_from_touch_screen() {
        let ev = classify_event(
            EventType::KEY,
            KeyCode::BTN_TOUCH.code(),
            1,
            DeviceClass::TouchScreen,
        );
        assert_eq!(ev, InputEvent::TouchBegin);

        let ev = classify_event(
            EventType::KEY,
            KeyCode::BTN_TOUCH.code(),
            1,
            DeviceClass::Pointer,
        );
        assert_eq!(ev, InputEvent::Other);
    }

    #[test]
    fn test_touch_release_ignored() {
        let ev = classify_event(
            EventType::KEY,
            KeyCode::BTN_TOUCH.code(),
            0,
            DeviceClass::TouchScreen,
        );
        assert_eq!(ev, InputEvent::Other);
    }

    #[test]
    fn test_button_press_source_by_device() {
        let ev = classify_event(
            EventType::KEY,
            KeyCode::BTN_LEFT.code(),
            1,
            DeviceClass::Pointer,
        );
        assert_eq!(ev, InputEvent::physical_press());

        let ev = classify_event(
            EventType::KEY,
            KeyCode::BTN_LEFT.code(),
            1,
            DeviceClass::TouchScreen,
        );
        assert_eq!(ev, InputEvent::synthesized_press());
    }

    #[test]
    fn test_wheel_and_motion() {
        let ev = classify_event(
            EventType::RELATIVE,
            RelativeAxisCode::REL_WHEEL.0,
            -1,
            DeviceClass::Pointer,
        );
        assert_eq!(ev, InputEvent::Wheel);

        let ev = classify_event(
            EventType::RELATIVE,
            RelativeAxisCode::REL_X.0,
            4,
            DeviceClass::Pointer,
        );
        assert_eq!(
            ev,
            InputEvent::PointerMove {
                source: PointerSource::Physical
            }
        );
    }

    #[test]
    fn test_unrelated_events_pass_through() {
        let ev = classify_event(
            EventType::KEY,
            KeyCode::KEY_A.code(),
            1,
            DeviceClass::Pointer,
        );
        assert_eq!(ev, InputEvent::Other);

        let ev = classify_event(EventType::SYNCHRONIZATION, 0, 0, DeviceClass::Pointer);
        assert_eq!(ev, InputEvent::Other);
    }
}
