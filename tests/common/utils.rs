use ax_snapshot::action::action_model::DispatchSettings;
use ax_snapshot::ax::attr_model::{AX_MAIN, AX_SELECTED_TEXT_RANGE, AX_VALUE, Rect, TextRange};
use ax_snapshot::ax::fixture::{ApplicationSpec, ElementSpec, FixtureBackend, FixtureSpec};

/// Main document window of the frontmost TextEdit.
pub fn editor_window() -> ElementSpec {
    ElementSpec::new("AXWindow")
        .title("Untitled")
        .attr(AX_MAIN, true)
        .frame(0.0, 0.0, 800.0, 600.0)
        .child(
            ElementSpec::new("AXTextArea")
                .attr(AX_VALUE, "draft")
                .attr(AX_SELECTED_TEXT_RANGE, TextRange { location: 2, length: 3 })
                .frame(10.0, 40.0, 780.0, 500.0)
                .action("AXPress")
                .with_text_bounds(Rect { x: 12.5, y: 44.0, width: 30.25, height: 16.0 }),
        )
        .child(
            ElementSpec::new("AXButton")
                .title("Save")
                .frame(700.0, 560.0, 80.0, 24.0)
                .action("AXPress"),
        )
        .child(
            ElementSpec::new("AXGroup")
                .title("Collapsed")
                .frame(0.0, 0.0, 0.0, 120.0)
                .child(ElementSpec::new("AXButton").title("Hidden").frame(0.0, 0.0, 50.0, 20.0)),
        )
}

pub fn inspector_window() -> ElementSpec {
    ElementSpec::new("AXWindow")
        .title("Inspector")
        .attr(AX_MAIN, false)
        .child(ElementSpec::new("AXCheckBox").title("Ruler"))
}

pub fn finder_window() -> ElementSpec {
    ElementSpec::new("AXWindow")
        .title("Downloads")
        .attr(AX_MAIN, true)
        .child(ElementSpec::new("AXButton").title("Back").action("AXPress"))
}

pub fn desktop_spec() -> FixtureSpec {
    FixtureSpec {
        trusted: true,
        applications: vec![
            ApplicationSpec::new("Finder").window(finder_window()),
            ApplicationSpec::new("TextEdit")
                .active()
                .window(inspector_window())
                .window(editor_window()),
        ],
    }
}

pub fn desktop() -> FixtureBackend {
    FixtureBackend::new(desktop_spec())
}

pub fn untrusted_desktop() -> FixtureBackend {
    let mut backend = desktop();
    backend.set_trusted(false);
    backend
}

/// Single frontmost app whose main window is `window`.
pub fn single_window(window: ElementSpec) -> FixtureBackend {
    FixtureBackend::new(FixtureSpec {
        trusted: true,
        applications: vec![ApplicationSpec::new("Fixture").active().window(window)],
    })
}

pub fn main_window(role_title: &str) -> ElementSpec {
    ElementSpec::new("AXWindow").title(role_title).attr(AX_MAIN, true)
}

pub fn no_delay() -> DispatchSettings {
    DispatchSettings::immediate()
}
