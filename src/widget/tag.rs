//! Tag registry: the closed set of node kinds and their widget behaviour.

use std::fmt;
use std::str::FromStr;

use crate::widget::traits::Widget;
use crate::widgets::{
    Button, Checkbox, ColorPicker, Container, Image, Input, Radio, Select, Slider, Switch, Text,
};

/// Tag identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Button,
    Checkbox,
    Color,
    Div,
    Image,
    Input,
    Radio,
    Select,
    Slider,
    Switch,
    Template,
    Text,
}

impl Tag {
    /// Every tag, in name order.
    pub const ALL: [Tag; 12] = [
        Tag::Button,
        Tag::Checkbox,
        Tag::Color,
        Tag::Div,
        Tag::Image,
        Tag::Input,
        Tag::Radio,
        Tag::Select,
        Tag::Slider,
        Tag::Switch,
        Tag::Template,
        Tag::Text,
    ];

    /// The tag name as written in templates and matched by tag selectors.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Button => "button",
            Tag::Checkbox => "checkbox",
            Tag::Color => "color",
            Tag::Div => "div",
            Tag::Image => "image",
            Tag::Input => "input",
            Tag::Radio => "radio",
            Tag::Select => "select",
            Tag::Slider => "slider",
            Tag::Switch => "switch",
            Tag::Template => "template",
            Tag::Text => "text",
        }
    }

    /// The widget implementing this tag's behaviour.
    pub fn widget(self) -> &'static dyn Widget {
        match self {
            Tag::Button => &Button,
            Tag::Checkbox => &Checkbox,
            Tag::Color => &ColorPicker,
            Tag::Div | Tag::Template => &Container,
            Tag::Image => &Image,
            Tag::Input => &Input,
            Tag::Radio => &Radio,
            Tag::Select => &Select,
            Tag::Slider => &Slider,
            Tag::Switch => &Switch,
            Tag::Text => &Text,
        }
    }

    /// Whether nodes of this tag may hold children.
    pub fn is_container(self) -> bool {
        self.widget().is_container()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a tag name outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag '{0}'")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.name() == s)
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}
