use once_cell::sync::Lazy;

use crate::models::Resource;

static COMPUTER: Lazy<Resource> = Lazy::new(|| {
    Resource::builder()
        .code("PC-001")
        .name("Lenovo laptop")
        .resource_type("computer")
        .status("available")
        .build()
        .expect("invalid computer prototype")
});

static PROJECTOR: Lazy<Resource> = Lazy::new(|| {
    Resource::builder()
        .code("PY-001")
        .name("LG projector")
        .resource_type("projector")
        .status("available")
        .build()
        .expect("invalid projector prototype")
});

/// Named templates new resources can be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrototypeKind {
    /// Portable computer.
    Computer,
    /// Projector.
    Projector,
}

impl PrototypeKind {
    /// Every available prototype, in menu order.
    pub const ALL: [PrototypeKind; 2] = [PrototypeKind::Computer, PrototypeKind::Projector];

    /// Map a numbered menu choice onto a prototype. Anything other than
    /// `1` or `2` means "no prototype".
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Computer),
            "2" => Some(Self::Projector),
            _ => None,
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.label() == needle)
    }

    /// Lowercase label, matching the prototype's type.
    pub fn label(self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Projector => "projector",
        }
    }

    /// The shared template.
    pub fn prototype(self) -> &'static Resource {
        match self {
            Self::Computer => &COMPUTER,
            Self::Projector => &PROJECTOR,
        }
    }

    /// Fresh copy of the template, free to modify.
    pub fn instantiate(self) -> Resource {
        self.prototype().duplicate()
    }
}
