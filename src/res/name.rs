// Resource names
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

//! Resource identity independent of configuration.
//!
//! A [`ResourceName`] is the triple `(package, type, entry)`.
//! Names are written `package:type/entry`,
//!   or `type/entry` when the package is implied by context;
//!     a name with an empty package is _local_ and is qualified by the
//!     [`ResourceTable`](crate::table::ResourceTable) that owns it.

use memchr::memchr;
use std::{
    error::Error,
    fmt::{self, Display},
    str::FromStr,
};

/// Type tag of a resource.
///
/// The variant order determines the order of [`ResourceName`]s,
///   and is otherwise insignificant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
    Anim,
    Animator,
    Array,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Fraction,
    Id,
    Integer,
    Interpolator,
    Layout,
    Menu,
    Mipmap,
    Plurals,
    Raw,
    String,
    Style,
    Styleable,
    Transition,
    Xml,
}

impl ResourceType {
    /// Every type tag,
    ///   in declaration order.
    pub const ALL: [ResourceType; 22] = {
        use ResourceType::*;
        [
            Anim,
            Animator,
            Array,
            Attr,
            Bool,
            Color,
            Dimen,
            Drawable,
            Fraction,
            Id,
            Integer,
            Interpolator,
            Layout,
            Menu,
            Mipmap,
            Plurals,
            Raw,
            String,
            Style,
            Styleable,
            Transition,
            Xml,
        ]
    };

    /// The tag as it appears in a resource name.
    pub fn as_str(&self) -> &'static str {
        use ResourceType::*;

        match self {
            Anim => "anim",
            Animator => "animator",
            Array => "array",
            Attr => "attr",
            Bool => "bool",
            Color => "color",
            Dimen => "dimen",
            Drawable => "drawable",
            Fraction => "fraction",
            Id => "id",
            Integer => "integer",
            Interpolator => "interpolator",
            Layout => "layout",
            Menu => "menu",
            Mipmap => "mipmap",
            Plurals => "plurals",
            Raw => "raw",
            String => "string",
            Style => "style",
            Styleable => "styleable",
            Transition => "transition",
            Xml => "xml",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|ty| ty.as_str() == s)
            .copied()
            .ok_or_else(|| NameError::UnknownType(s.into()))
    }
}

/// Unique identity of a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName {
    package: String,
    ty: ResourceType,
    entry: String,
}

impl ResourceName {
    pub fn new<P, E>(package: P, ty: ResourceType, entry: E) -> Self
    where
        P: Into<String>,
        E: Into<String>,
    {
        Self {
            package: package.into(),
            ty,
            entry: entry.into(),
        }
    }

    /// A name whose package is implied by the table that resolves it.
    pub fn local<E: Into<String>>(ty: ResourceType, entry: E) -> Self {
        Self::new(String::new(), ty, entry)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn ty(&self) -> ResourceType {
        self.ty
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Whether this name lacks an explicit package.
    pub fn is_local(&self) -> bool {
        self.package.is_empty()
    }

    /// Produce a copy of this name belonging to `package`.
    pub fn with_package<P: Into<String>>(&self, package: P) -> Self {
        Self {
            package: package.into(),
            ty: self.ty,
            entry: self.entry.clone(),
        }
    }

    /// Parse `[package:]type/entry`.
    ///
    /// If `default_ty` is provided,
    ///   the `type/` portion may be omitted
    ///     (as in theme attribute references `?name`).
    pub fn parse_with_default(
        s: &str,
        default_ty: Option<ResourceType>,
    ) -> Result<Self, NameError> {
        let bytes = s.as_bytes();

        let (package, rest) = match memchr(b':', bytes) {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => ("", s),
        };

        let (ty, entry) = match (memchr(b'/', rest.as_bytes()), default_ty) {
            (Some(i), _) => (rest[..i].parse()?, &rest[i + 1..]),
            (None, Some(ty)) => (ty, rest),
            (None, None) => return Err(NameError::Malformed(s.into())),
        };

        if entry.is_empty() || memchr(b'/', entry.as_bytes()).is_some() {
            return Err(NameError::Malformed(s.into()));
        }

        Ok(Self::new(package, ty, entry))
    }
}

impl FromStr for ResourceName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, None)
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}:", self.package)?;
        }

        write!(f, "{}/{}", self.ty, self.entry)
    }
}

/// A resource name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The type portion of the name is not a known [`ResourceType`].
    UnknownType(String),

    /// The name is not of the form `[package:]type/entry`.
    Malformed(String),
}

impl Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownType(ty) => {
                write!(f, "unknown resource type `{}`", ty)
            }
            Self::Malformed(name) => {
                write!(f, "malformed resource name `{}`", name)
            }
        }
    }
}

impl Error for NameError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_tags_round_trip_through_str() {
        for ty in ResourceType::ALL {
            assert_eq!(Ok(ty), ty.as_str().parse());
        }
    }

    #[test]
    fn unknown_type_tag() {
        assert_eq!(
            Err(NameError::UnknownType("colour".into())),
            "colour".parse::<ResourceType>()
        );
    }

    #[test]
    fn parses_local_and_qualified_names() -> Result<(), NameError> {
        assert_eq!(
            ResourceName::local(ResourceType::Color, "accent"),
            "color/accent".parse()?,
        );

        assert_eq!(
            ResourceName::new("android", ResourceType::Attr, "textSize"),
            "android:attr/textSize".parse()?,
        );

        Ok(())
    }

    #[test]
    fn default_type_applies_only_when_omitted() -> Result<(), NameError> {
        let attr = Some(ResourceType::Attr);

        assert_eq!(
            ResourceName::local(ResourceType::Attr, "colorPrimary"),
            ResourceName::parse_with_default("colorPrimary", attr)?,
        );

        assert_eq!(
            ResourceName::new("android", ResourceType::Style, "Theme"),
            ResourceName::parse_with_default("android:style/Theme", attr)?,
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["color", "color/", "color/a/b", "bogus/a"] {
            assert!(bad.parse::<ResourceName>().is_err(), "{}", bad);
        }
    }

    #[test]
    fn display_omits_empty_package() {
        assert_eq!(
            "style/Base",
            ResourceName::local(ResourceType::Style, "Base").to_string()
        );
        assert_eq!(
            "app:style/Base",
            ResourceName::new("app", ResourceType::Style, "Base").to_string()
        );
    }

    #[test]
    fn ordered_by_package_then_type_then_entry() {
        let mut names = vec![
            ResourceName::new("b", ResourceType::Attr, "a"),
            ResourceName::new("a", ResourceType::Style, "a"),
            ResourceName::new("a", ResourceType::Attr, "b"),
            ResourceName::new("a", ResourceType::Attr, "a"),
        ];

        names.sort();

        assert_eq!(
            vec!["a:attr/a", "a:attr/b", "a:style/a", "b:attr/a"],
            names.iter().map(ToString::to_string).collect::<Vec<_>>(),
        );
    }
}
