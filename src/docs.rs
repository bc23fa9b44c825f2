//! Static documentation corpus
//!
//! Reference text and example scripts shown in the documentation dialog and
//! the code pane's API Reference tab. Read-only; nothing here is parsed or
//! executed.

use once_cell::sync::Lazy;

/// Version of the documented engine API
pub const DOCS_VERSION: &str = "1.0.0";

/// Script the code pane starts with
pub const INITIAL_SCRIPT: &str = include_str!("../assets/docs/initial_script.py");

/// Dialog tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocsTab {
    #[default]
    ApiReference,
    Tutorials,
    Examples,
}

impl DocsTab {
    pub const ALL: [DocsTab; 3] = [DocsTab::ApiReference, DocsTab::Tutorials, DocsTab::Examples];

    pub fn title(self) -> &'static str {
        match self {
            DocsTab::ApiReference => "API Reference",
            DocsTab::Tutorials => "Tutorials",
            DocsTab::Examples => "Examples",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DocsTab::ApiReference => DocsTab::Tutorials,
            DocsTab::Tutorials => DocsTab::Examples,
            DocsTab::Examples => DocsTab::ApiReference,
        }
    }

    pub fn prev(self) -> Self {
        self.next().next()
    }
}

/// One heading in the documentation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSection {
    pub title: &'static str,
    pub summary: &'static str,
    /// Bullet points (tutorial outlines)
    pub points: &'static [&'static str],
    /// Code block, if any
    pub snippet: Option<&'static str>,
}

/// A titled group of entries in the quick reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReferenceGroup {
    pub title: &'static str,
    pub entries: &'static [&'static str],
}

const fn section(
    title: &'static str,
    summary: &'static str,
    snippet: &'static str,
) -> DocSection {
    DocSection {
        title,
        summary,
        points: &[],
        snippet: Some(snippet),
    }
}

const fn outline(
    title: &'static str,
    summary: &'static str,
    points: &'static [&'static str],
) -> DocSection {
    DocSection {
        title,
        summary,
        points,
        snippet: None,
    }
}

static API_REFERENCE: [DocSection; 6] = [
    section(
        "Scene",
        "The main container for all 3D objects.",
        include_str!("../assets/docs/api_scene.py"),
    ),
    section(
        "Mesh",
        "Represents a 3D object with vertices and faces.",
        include_str!("../assets/docs/api_mesh.py"),
    ),
    section(
        "Camera",
        "Defines the viewpoint for rendering.",
        include_str!("../assets/docs/api_camera.py"),
    ),
    section(
        "Light",
        "Light sources for illuminating the scene.",
        include_str!("../assets/docs/api_light.py"),
    ),
    section(
        "Material",
        "Defines surface properties of objects.",
        include_str!("../assets/docs/api_material.py"),
    ),
    section(
        "Utility Functions",
        "Helper methods for creating common shapes.",
        include_str!("../assets/docs/api_shapes.py"),
    ),
];

static TUTORIALS: [DocSection; 5] = [
    outline(
        "Getting Started",
        "Learn how to set up your first 3D scene.",
        &[
            "1. Import the necessary modules",
            "2. Create a scene",
            "3. Add a camera",
            "4. Create and add 3D objects",
            "5. Add lighting",
            "6. Render the scene",
        ],
    ),
    outline(
        "Working with Meshes",
        "Learn how to create and manipulate 3D objects.",
        &[
            "Creating meshes from vertices and faces",
            "Using built-in shape functions",
            "Transforming objects (translate, rotate, scale)",
            "Applying materials",
        ],
    ),
    outline(
        "Lighting Techniques",
        "Master different lighting setups for your scenes.",
        &[
            "Three-point lighting setup",
            "Working with shadows",
            "Ambient lighting vs. direct lighting",
            "Creating mood with colored lights",
        ],
    ),
    outline(
        "Animation Basics",
        "Learn how to create simple animations.",
        &[
            "Animation loops",
            "Keyframe animation",
            "Physics-based animation",
            "Camera animation",
        ],
    ),
    outline(
        "Advanced Rendering",
        "Dive into more advanced rendering techniques.",
        &[
            "Texture mapping",
            "Normal mapping",
            "Reflection and refraction",
            "Post-processing effects",
        ],
    ),
];

static EXAMPLES: [DocSection; 3] = [
    section(
        "Rotating Cube",
        "",
        include_str!("../assets/docs/example_rotating_cube.py"),
    ),
    section(
        "Solar System",
        "",
        include_str!("../assets/docs/example_solar_system.py"),
    ),
    section(
        "Terrain Generation",
        "",
        include_str!("../assets/docs/example_terrain.py"),
    ),
];

static QUICK_REFERENCE: [QuickReferenceGroup; 3] = [
    QuickReferenceGroup {
        title: "Core Components",
        entries: &[
            "Scene - Main container for all 3D objects",
            "Camera - Defines view perspective",
            "Mesh - 3D object with vertices and faces",
            "Light - Light sources for the scene",
            "Material - Surface properties",
        ],
    },
    QuickReferenceGroup {
        title: "Important Methods",
        entries: &[
            "scene.add_mesh(mesh)",
            "scene.add_light(light)",
            "scene.render()",
            "mesh.rotate(axis, angle)",
            "mesh.translate(vector)",
        ],
    },
    QuickReferenceGroup {
        title: "Shape Utilities",
        entries: &[
            "create_cube(size=1.0)",
            "create_sphere(radius=1.0, segments=16)",
            "create_cylinder(radius=1.0, height=2.0)",
            "create_plane(width=1.0, height=1.0)",
        ],
    },
];

/// Sections for a dialog tab
pub fn sections(tab: DocsTab) -> &'static [DocSection] {
    match tab {
        DocsTab::ApiReference => &API_REFERENCE,
        DocsTab::Tutorials => &TUTORIALS,
        DocsTab::Examples => &EXAMPLES,
    }
}

/// Groups shown in the code pane's API Reference tab
pub fn quick_reference() -> &'static [QuickReferenceGroup] {
    &QUICK_REFERENCE
}

static TAB_LINES: Lazy<[Vec<String>; 3]> =
    Lazy::new(|| DocsTab::ALL.map(|tab| flatten(sections(tab))));

/// A tab's content flattened to display lines (for scrolling)
pub fn lines(tab: DocsTab) -> &'static [String] {
    let idx = DocsTab::ALL
        .iter()
        .position(|t| *t == tab)
        .unwrap_or_default();
    &TAB_LINES[idx]
}

fn flatten(sections: &[DocSection]) -> Vec<String> {
    let mut out = Vec::new();
    for section in sections {
        out.push(format!("## {}", section.title));
        if !section.summary.is_empty() {
            out.push(section.summary.to_string());
        }
        for point in section.points {
            out.push(format!("  • {}", point));
        }
        if let Some(snippet) = section.snippet {
            out.extend(snippet.lines().map(|l| format!("    {}", l)));
        }
        out.push(String::new());
    }
    out
}
