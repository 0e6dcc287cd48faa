//! Cell and text style: colors, modifiers, and the `patch` composition rule.

use std::collections::HashMap;

use crate::color::Color;

/// A single text attribute a cell can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Modifier {
    /// Bold text.
    Bold,
    /// Dim/faint text.
    Dim,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underlined,
    /// Slow blink.
    SlowBlink,
    /// Rapid blink.
    RapidBlink,
    /// Reverse video.
    Reversed,
    /// Hidden/concealed text.
    Hidden,
    /// Strikethrough.
    CrossedOut,
}

impl Modifier {
    const ALL: [Modifier; 9] = [
        Modifier::Bold,
        Modifier::Dim,
        Modifier::Italic,
        Modifier::Underlined,
        Modifier::SlowBlink,
        Modifier::RapidBlink,
        Modifier::Reversed,
        Modifier::Hidden,
        Modifier::CrossedOut,
    ];

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A set of [`Modifier`] flags, stored as a bitset.
///
/// `Style` keeps two disjoint sets, `add` and `sub`, so that a child style
/// can explicitly clear a modifier inherited from a parent rather than only
/// ever being able to turn attributes on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u16);

impl ModifierSet {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Create a set from a slice of modifiers.
    pub fn from_iter(mods: impl IntoIterator<Item = Modifier>) -> Self {
        let mut set = Self::NONE;
        for m in mods {
            set = set.insert(m);
        }
        set
    }

    /// Returns a copy of this set with `m` added.
    #[must_use]
    pub const fn insert(self, m: Modifier) -> Self {
        Self(self.0 | m.bit())
    }

    /// Returns true if `m` is present in this set.
    pub const fn contains(self, m: Modifier) -> bool {
        self.0 & m.bit() != 0
    }

    /// Set difference: modifiers in `self` but not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Set union.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if the set has no modifiers.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the modifiers present in this set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

/// Style attributes for a cell: colors, modifiers, and an optional hyperlink.
///
/// Unlike a plain "last write wins" merge, `Style` tracks modifiers as two
/// disjoint sets — `add` and `sub` — so that [`Style::patch`] can express
/// "explicitly turn this off" rather than only "turn this on". See
/// [`Style::patch`] for the composition rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Underline color (distinct from the text foreground color).
    pub underline_color: Option<Color>,
    /// Modifiers this style turns on.
    pub add: ModifierSet,
    /// Modifiers this style explicitly turns off, overriding an inherited `add`.
    pub sub: ModifierSet,
    /// OSC 8 hyperlink URL.
    pub hyperlink: Option<String>,
    /// Opaque extension slots (e.g. semantic tags attached to a styled region).
    pub extensions: HashMap<String, String>,
}

impl Style {
    /// Create an empty style with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the underline color.
    #[must_use]
    pub fn underline_color(mut self, color: Color) -> Self {
        self.underline_color = Some(color);
        self
    }

    /// Turn a modifier on (added to `add`, removed from `sub`).
    #[must_use]
    pub fn add_modifier(mut self, m: Modifier) -> Self {
        self.add = self.add.insert(m);
        self.sub = self.sub.difference(ModifierSet::NONE.insert(m));
        self
    }

    /// Explicitly turn a modifier off (added to `sub`, removed from `add`).
    #[must_use]
    pub fn remove_modifier(mut self, m: Modifier) -> Self {
        self.sub = self.sub.insert(m);
        self.add = self.add.difference(ModifierSet::NONE.insert(m));
        self
    }

    /// Convenience builder for bold.
    #[must_use]
    pub fn bold(self, val: bool) -> Self {
        self.toggle(Modifier::Bold, val)
    }

    /// Convenience builder for italic.
    #[must_use]
    pub fn italic(self, val: bool) -> Self {
        self.toggle(Modifier::Italic, val)
    }

    /// Convenience builder for underline.
    #[must_use]
    pub fn underline(self, val: bool) -> Self {
        self.toggle(Modifier::Underlined, val)
    }

    /// Convenience builder for strikethrough.
    #[must_use]
    pub fn strikethrough(self, val: bool) -> Self {
        self.toggle(Modifier::CrossedOut, val)
    }

    /// Convenience builder for dim.
    #[must_use]
    pub fn dim(self, val: bool) -> Self {
        self.toggle(Modifier::Dim, val)
    }

    /// Convenience builder for reverse video.
    #[must_use]
    pub fn reverse(self, val: bool) -> Self {
        self.toggle(Modifier::Reversed, val)
    }

    fn toggle(self, m: Modifier, val: bool) -> Self {
        if val {
            self.add_modifier(m)
        } else {
            self.remove_modifier(m)
        }
    }

    /// Returns true if a given modifier is active (added, and not subsequently subtracted).
    pub const fn has(&self, m: Modifier) -> bool {
        self.add.contains(m) && !self.sub.contains(m)
    }

    /// Set hyperlink URL.
    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.hyperlink = Some(url.into());
        self
    }

    /// Attach an opaque extension key/value pair (e.g. a semantic tag).
    #[must_use]
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Compose `other` on top of `self`: `self.patch(other)`.
    ///
    /// Scalar fields (colors, hyperlink) take `other`'s value when present,
    /// except that a concrete color (`Rgb`/`Indexed`/`Ansi`/`Reset`) already
    /// held by `self` is not overridden by an incoming `Named` color — see
    /// the `Color` docs for the soft-default rule.
    ///
    /// Modifier sets compose disjointly: `add = (self.add \ other.sub) ∪
    /// other.add`, `sub = (self.sub \ other.add) ∪ other.sub`. This lets a
    /// child style clear a modifier an ancestor turned on.
    #[must_use]
    pub fn patch(&self, other: &Style) -> Style {
        let mut extensions = self.extensions.clone();
        extensions.extend(other.extensions.clone());

        Style {
            fg: patch_color(self.fg.as_ref(), other.fg.as_ref()),
            bg: patch_color(self.bg.as_ref(), other.bg.as_ref()),
            underline_color: patch_color(
                self.underline_color.as_ref(),
                other.underline_color.as_ref(),
            ),
            add: self.add.difference(other.sub).union(other.add),
            sub: self.sub.difference(other.add).union(other.sub),
            hyperlink: other.hyperlink.clone().or_else(|| self.hyperlink.clone()),
            extensions,
        }
    }

    /// Returns true if no attributes are set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolve a patched color field, applying the `Named`-is-a-soft-default rule.
fn patch_color(base: Option<&Color>, incoming: Option<&Color>) -> Option<Color> {
    match incoming {
        None => base.cloned(),
        Some(Color::Named(_)) => match base {
            Some(existing) if !matches!(existing, Color::Named(_)) => Some(existing.clone()),
            _ => incoming.cloned(),
        },
        Some(concrete) => Some(concrete.clone()),
    }
}
