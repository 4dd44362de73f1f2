// Resource values
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of reslink.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! The closed set of resource values.
//!
//! Every table entry holds exactly one [`Value`].
//! Scalars are [`Item`]s;
//!   compound values
//!     ([`Style`], [`Styleable`], [`Array`], [`Plural`])
//!   hold items and [`Reference`]s that the [linker](crate::ld) must
//!   resolve.
//!
//! Raw Literals
//! ============
//! A declaration parser does not know the format of a value assigned to
//!   a style attribute until that attribute is resolved,
//!     so such values are stored as [`Item::Raw`] and are converted into
//!     typed items during linking.

use super::{
    attr::{Attribute, Format},
    name::{ResourceName, ResourceType},
    primitive::{Color, Complex},
    ResourceId,
};
use arrayvec::ArrayVec;
use std::fmt::{self, Display};

/// Whether a [`Reference`] has been bound to a [`ResourceId`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefState {
    #[default]
    Unresolved,
    Resolved(ResourceId),
}

/// Syntactic kind of a [`Reference`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefKind {
    /// `@type/name`
    #[default]
    Resource,

    /// `?name`,
    ///   a reference to the value of a theme attribute.
    Attribute,
}

/// Symbolic pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: ResourceName,
    pub kind: RefKind,

    /// Whether the target is referenced as private
    ///   (`@*package:type/name`).
    pub private: bool,

    pub state: RefState,
}

impl Reference {
    /// An unresolved resource reference to `name`.
    pub fn to(name: ResourceName) -> Self {
        Self {
            name,
            kind: RefKind::Resource,
            private: false,
            state: RefState::Unresolved,
        }
    }

    /// An unresolved theme attribute reference to `name`.
    pub fn to_attr(name: ResourceName) -> Self {
        Self {
            kind: RefKind::Attribute,
            ..Self::to(name)
        }
    }

    /// Parse `@[+][*][package:]type/entry` or `?[package:][attr/]entry`.
    ///
    /// `@null` and `@empty` are not references;
    ///   see [`Item::parse_reference`].
    ///
    /// ```
    /// use reslink::res::{Reference, RefKind, ResourceName, ResourceType};
    ///
    /// let r = Reference::parse("@android:color/white").unwrap();
    /// assert_eq!(
    ///     ResourceName::new("android", ResourceType::Color, "white"),
    ///     r.name,
    /// );
    ///
    /// let r = Reference::parse("?colorAccent").unwrap();
    /// assert_eq!(RefKind::Attribute, r.kind);
    /// assert_eq!(ResourceType::Attr, r.name.ty());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(rest) = s.strip_prefix('@') {
            // `+` declares an id inline,
            //   which is otherwise an ordinary reference.
            let rest = rest.strip_prefix('+').unwrap_or(rest);
            let (private, rest) = match rest.strip_prefix('*') {
                Some(rest) => (true, rest),
                None => (false, rest),
            };

            ResourceName::parse_with_default(rest, None)
                .ok()
                .map(|name| Self {
                    private,
                    ..Self::to(name)
                })
        } else if let Some(rest) = s.strip_prefix('?') {
            ResourceName::parse_with_default(rest, Some(ResourceType::Attr))
                .ok()
                .filter(|name| name.ty() == ResourceType::Attr)
                .map(Self::to_attr)
        } else {
            None
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, RefState::Resolved(_))
    }

    /// The id this reference resolved to,
    ///   if any.
    pub fn id(&self) -> Option<ResourceId> {
        match self.state {
            RefState::Resolved(id) => Some(id),
            RefState::Unresolved => None,
        }
    }

    /// Bind this reference to `id`.
    pub fn resolve(&mut self, id: ResourceId) {
        self.state = RefState::Resolved(id);
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            RefKind::Resource => f.write_str("@")?,
            RefKind::Attribute => f.write_str("?")?,
        }

        if self.private {
            f.write_str("*")?;
        }

        Display::fmt(&self.name, f)
    }
}

/// A scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Reference(Reference),

    /// Literal text whose format is not yet known.
    Raw(String),

    String(String),

    /// `@null`: explicitly no value.
    Null,

    /// `@empty`: an explicitly empty value.
    Empty,

    Int(i32),

    /// An integer written in hexadecimal,
    ///   or the packed value of a set of flags.
    IntHex(u32),

    Bool(bool),
    Float(f32),
    Color(Color),
    Dimension(Complex),
    Fraction(Complex),
}

impl Item {
    /// Parse `@null`, `@empty`, or a [`Reference`].
    pub fn parse_reference(s: &str) -> Option<Self> {
        match s {
            "@null" => Some(Item::Null),
            "@empty" => Some(Item::Empty),
            _ => Reference::parse(s).map(Item::Reference),
        }
    }

    /// The format this item satisfies,
    ///   or [`None`] for [`Item::Raw`],
    ///     which has not yet been given a format.
    ///
    /// [`Item::Null`] and [`Item::Empty`] satisfy any format and so
    ///   produce [`Format::all`].
    pub fn format(&self) -> Option<Format> {
        Some(match self {
            Item::Reference(_) => Format::REFERENCE,
            Item::Raw(_) => return None,
            Item::String(_) => Format::STRING,
            Item::Null | Item::Empty => Format::all(),
            Item::Int(_) | Item::IntHex(_) => {
                Format::INTEGER | Format::ENUM | Format::FLAGS
            }
            Item::Bool(_) => Format::BOOLEAN,
            Item::Float(_) => Format::FLOAT,
            Item::Color(_) => Format::COLOR,
            Item::Dimension(_) => Format::DIMENSION,
            Item::Fraction(_) => Format::FRACTION,
        })
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Item::Reference(r) => Some(r),
            _ => None,
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Item::Reference(r) => Display::fmt(r, f),
            Item::Raw(s) => write!(f, "(raw) \"{}\"", s),
            Item::String(s) => write!(f, "\"{}\"", s),
            Item::Null => f.write_str("@null"),
            Item::Empty => f.write_str("@empty"),
            Item::Int(i) => write!(f, "{}", i),
            Item::IntHex(i) => write!(f, "{:#x}", i),
            Item::Bool(b) => write!(f, "{}", b),
            Item::Float(x) => write!(f, "{}", x),
            Item::Color(c) => Display::fmt(c, f),
            Item::Dimension(c) | Item::Fraction(c) => Display::fmt(c, f),
        }
    }
}

/// Ordered set of attributes forming a configurable surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styleable {
    pub attrs: Vec<Reference>,
}

/// A single attribute assignment within a [`Style`].
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    pub key: Reference,
    pub value: Item,
}

/// Mapping from attribute to value,
///   optionally inheriting from a parent style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub parent: Option<Reference>,
    pub entries: Vec<StyleEntry>,
}

impl Style {
    /// Append an assignment of `value` to the attribute `key`.
    pub fn with_entry(mut self, key: ResourceName, value: Item) -> Self {
        self.entries.push(StyleEntry {
            key: Reference::to(key),
            value,
        });
        self
    }
}

/// Ordered sequence of items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    pub items: Vec<Item>,
}

/// Plural quantity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Quantity {
    pub const COUNT: usize = 6;

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from [`Quantity`] to item.
///
/// There is at most one item per quantity,
///   so storage is bounded by [`Quantity::COUNT`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plural {
    values: ArrayVec<(Quantity, Item), { Quantity::COUNT }>,
}

impl Plural {
    /// Set the item for `quantity`,
    ///   returning any item it replaces.
    pub fn set(&mut self, quantity: Quantity, item: Item) -> Option<Item> {
        match self.values.iter_mut().find(|(q, _)| *q == quantity) {
            Some((_, existing)) => Some(std::mem::replace(existing, item)),
            None => {
                self.values.push((quantity, item));
                None
            }
        }
    }

    pub fn with(mut self, quantity: Quantity, item: Item) -> Self {
        self.set(quantity, item);
        self
    }

    pub fn get(&self, quantity: Quantity) -> Option<&Item> {
        self.values
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, &Item)> {
        self.values.iter().map(|(q, item)| (*q, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Quantity, &mut Item)> {
        self.values.iter_mut().map(|(q, item)| (*q, item))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A resource value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Item(Item),
    Attribute(Attribute),
    Styleable(Styleable),
    Style(Style),
    Array(Array),
    Plural(Plural),

    /// Explicitly no value,
    ///   as distinct from the absence of an entry.
    Sentinel,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Item(Item::Reference(_)) => ValueKind::Reference,
            Value::Item(_) => ValueKind::Item,
            Value::Attribute(_) => ValueKind::Attribute,
            Value::Styleable(_) => ValueKind::Styleable,
            Value::Style(_) => ValueKind::Style,
            Value::Array(_) => ValueKind::Array,
            Value::Plural(_) => ValueKind::Plural,
            Value::Sentinel => ValueKind::Sentinel,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Value::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Locate the [`Reference`] at `site`,
    ///   if `site` describes a reference within this value.
    pub fn reference_at(&self, site: RefSite) -> Option<&Reference> {
        match (self, site) {
            (Value::Item(item), RefSite::Item) => item.as_reference(),

            (Value::Style(style), RefSite::StyleParent) => {
                style.parent.as_ref()
            }
            (Value::Style(style), RefSite::StyleKey(i)) => {
                style.entries.get(i).map(|entry| &entry.key)
            }
            (Value::Style(style), RefSite::StyleValue(i)) => style
                .entries
                .get(i)
                .and_then(|entry| entry.value.as_reference()),

            (Value::Styleable(styleable), RefSite::StyleableAttr(i)) => {
                styleable.attrs.get(i)
            }

            (Value::Array(array), RefSite::ArrayItem(i)) => {
                array.items.get(i).and_then(Item::as_reference)
            }

            (Value::Plural(plural), RefSite::PluralItem(q)) => {
                plural.get(q).and_then(Item::as_reference)
            }

            _ => None,
        }
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Item(item)
    }
}

impl From<Attribute> for Value {
    fn from(attr: Attribute) -> Self {
        Value::Attribute(attr)
    }
}

impl From<Style> for Value {
    fn from(style: Style) -> Self {
        Value::Style(style)
    }
}

impl From<Styleable> for Value {
    fn from(styleable: Styleable) -> Self {
        Value::Styleable(styleable)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Plural> for Value {
    fn from(plural: Plural) -> Self {
        Value::Plural(plural)
    }
}

/// Kind of a [`Value`] without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Reference,
    Item,
    Attribute,
    Styleable,
    Style,
    Array,
    Plural,
    Sentinel,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Reference => "reference",
            ValueKind::Item => "item",
            ValueKind::Attribute => "attribute",
            ValueKind::Styleable => "styleable",
            ValueKind::Style => "style",
            ValueKind::Array => "array",
            ValueKind::Plural => "plural",
            ValueKind::Sentinel => "sentinel",
        })
    }
}

/// Location of a [`Reference`] within a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefSite {
    /// The value is itself a reference.
    Item,
    StyleParent,
    StyleKey(usize),
    StyleValue(usize),
    StyleableAttr(usize),
    ArrayItem(usize),
    PluralItem(Quantity),
}

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> ResourceName {
        s.parse().unwrap()
    }

    #[test]
    fn parses_resource_references() {
        assert_eq!(
            Some(Reference::to(name("color/accent"))),
            Reference::parse("@color/accent"),
        );

        assert_eq!(
            Some(Reference::to(name("id/title"))),
            Reference::parse("@+id/title"),
        );

        assert_eq!(
            Some(Reference {
                private: true,
                ..Reference::to(name("android:drawable/internal"))
            }),
            Reference::parse("@*android:drawable/internal"),
        );
    }

    #[test]
    fn parses_theme_attribute_references() {
        assert_eq!(
            Some(Reference::to_attr(name("android:attr/textColor"))),
            Reference::parse("?android:textColor"),
        );

        assert_eq!(
            Some(Reference::to_attr(name("attr/tint"))),
            Reference::parse("?attr/tint"),
        );

        // Theme references must refer to attributes.
        assert_eq!(None, Reference::parse("?color/tint"));
    }

    #[test]
    fn rejects_non_references() {
        for bad in ["color/accent", "@", "@color", "@bogus/x", "?", "#fff"] {
            assert_eq!(None, Reference::parse(bad), "{}", bad);
        }
    }

    #[test]
    fn null_and_empty_are_not_references() {
        assert_eq!(Some(Item::Null), Item::parse_reference("@null"));
        assert_eq!(Some(Item::Empty), Item::parse_reference("@empty"));
        assert_eq!(None, Reference::parse("@null"));
    }

    #[test]
    fn reference_display_round_trips() {
        for s in ["@color/accent", "?android:attr/textColor", "@*a:id/b"] {
            assert_eq!(s, Reference::parse(s).unwrap().to_string());
        }
    }

    #[test]
    fn plural_set_replaces_by_quantity() {
        let mut plural = Plural::default()
            .with(Quantity::One, Item::Raw("one".into()))
            .with(Quantity::Other, Item::Raw("other".into()));

        assert_eq!(
            Some(Item::Raw("one".into())),
            plural.set(Quantity::One, Item::Raw("uno".into())),
        );

        assert_eq!(2, plural.len());
        assert_eq!(Some(&Item::Raw("uno".into())), plural.get(Quantity::One));
        assert_eq!(None, plural.get(Quantity::Few));
    }

    #[test]
    fn reference_at_site() {
        let style = Value::Style(Style {
            parent: Some(Reference::to(name("style/Base"))),
            ..Default::default()
        }
        .with_entry(name("attr/tint"), Item::Raw("#fff".into()))
        .with_entry(
            name("attr/icon"),
            Item::Reference(Reference::to(name("drawable/icon"))),
        ));

        assert_eq!(
            Some(&name("style/Base")),
            style.reference_at(RefSite::StyleParent).map(|r| &r.name)
        );
        assert_eq!(
            Some(&name("attr/icon")),
            style.reference_at(RefSite::StyleKey(1)).map(|r| &r.name)
        );
        assert_eq!(
            Some(&name("drawable/icon")),
            style.reference_at(RefSite::StyleValue(1)).map(|r| &r.name)
        );

        // Not a reference.
        assert_eq!(None, style.reference_at(RefSite::StyleValue(0)));

        // Wrong kind of site.
        assert_eq!(None, style.reference_at(RefSite::ArrayItem(0)));
    }

    #[test]
    fn value_kinds() {
        let r = Item::Reference(Reference::to(name("color/a")));

        assert_eq!(ValueKind::Reference, Value::Item(r).kind());
        assert_eq!(ValueKind::Item, Value::Item(Item::Int(1)).kind());
        assert_eq!(ValueKind::Sentinel, Value::Sentinel.kind());
        assert_eq!(
            ValueKind::Attribute,
            Value::from(Attribute::new(Format::ANY)).kind()
        );
    }
}
