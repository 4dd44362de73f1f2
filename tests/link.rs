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

use reslink::{
    diagnose::{Reporter, VisualReporter},
    global,
    ld::{trace::VoidTrace, Linker},
    res::{
        Attribute, Format, Item, Reference, ResourceId, ResourceName,
        SourceLine, Style, Styleable, Value,
    },
    resolve::TableResolver,
    table::ResourceTable,
};
use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

fn framework() -> Result<ResourceTable, Box<dyn Error>> {
    let src = SourceLine::new("android/res/values/attrs.xml", 1);
    let mut table =
        ResourceTable::new("android", global::FRAMEWORK_PACKAGE_ID);

    table.add(
        "attr/textColor".parse()?,
        src.clone(),
        Attribute::new(Format::REFERENCE | Format::COLOR).into(),
    )?;
    table.add(
        "attr/orientation".parse()?,
        src.clone(),
        Attribute::new(Format::ENUM)
            .with_symbol("horizontal", 0)
            .with_symbol("vertical", 1)
            .into(),
    )?;
    table.add("style/Theme".parse()?, src, Style::default().into())?;
    table.assign_ids()?;

    Ok(table)
}

fn styles(line: usize) -> SourceLine {
    SourceLine::new("res/values/styles.xml", line)
}

#[test]
fn links_app_against_framework() -> TestResult {
    let name = |s: &str| s.parse::<ResourceName>();
    let mut table = ResourceTable::new("app", global::APP_PACKAGE_ID);

    table.add(
        name("color/accent")?,
        styles(1),
        Item::Raw("#ff4081".into()).into(),
    )?;
    table.add(
        name("styleable/Widget")?,
        styles(2),
        Styleable {
            attrs: vec![
                Reference::to(name("android:attr/textColor")?),
                Reference::to(name("android:attr/orientation")?),
            ],
        }
        .into(),
    )?;
    table.add(
        name("style/AppTheme")?,
        styles(3),
        Style {
            parent: Some(Reference::to(name("android:style/Theme")?)),
            ..Default::default()
        }
        .with_entry(
            name("android:attr/textColor")?,
            Item::Raw("@color/accent".into()),
        )
        .with_entry(
            name("android:attr/orientation")?,
            Item::Raw("vertical".into()),
        )
        .into(),
    )?;

    let resolver = TableResolver::new().with_base(framework()?);
    let mut linker = Linker::with_trace(table, resolver, VoidTrace);

    assert!(linker.link_and_validate());
    assert!(linker.errors().is_empty());
    assert!(linker.unresolved_references().is_empty());

    let graph = linker.graph();
    assert!(graph.has_ref(
        &name("app:style/AppTheme")?,
        &name("android:style/Theme")?
    ));
    assert!(graph.has_ref(
        &name("app:style/AppTheme")?,
        &name("app:color/accent")?
    ));
    assert_eq!(
        2,
        graph.referrers_of(&name("android:attr/textColor")?).count()
    );

    let accent = linker
        .table()
        .find(&name("color/accent")?)
        .map(|entry| entry.id());
    let table = linker.into_table();

    match table.find(&name("style/AppTheme")?).map(|entry| entry.value()) {
        Some(Value::Style(style)) => {
            let parent = style.parent.as_ref();

            assert!(parent.map_or(false, Reference::is_resolved));
            assert_eq!(
                accent,
                style.entries[0].value.as_reference().and_then(Reference::id),
            );
            assert_eq!(Item::Int(1), style.entries[1].value);
        }
        other => panic!("expected style, found {other:?}"),
    }

    Ok(())
}

#[test]
fn reports_unresolved_and_invalid() -> TestResult {
    let name = |s: &str| s.parse::<ResourceName>();
    let mut table = ResourceTable::new("app", global::APP_PACKAGE_ID);

    table.add(
        name("style/Broken")?,
        styles(7),
        Style::default()
            .with_entry(
                name("android:attr/textColor")?,
                Item::Raw("chartreuse".into()),
            )
            .with_entry(name("attr/undeclared")?, Item::Raw("1".into()))
            .into(),
    )?;

    let resolver = TableResolver::new().with_base(framework()?);
    let mut linker = Linker::with_trace(table, resolver, VoidTrace);

    assert!(!linker.link_and_validate());
    assert_eq!(1, linker.errors().len());
    assert!(linker
        .unresolved_references()
        .contains(&name("app:attr/undeclared")?));

    let mut reporter = VisualReporter::new();

    let report = reporter.render(&linker.errors()[0]).to_string();
    assert!(report.starts_with(
        "error: invalid value for attribute `android:attr/textColor`: "
    ));
    assert!(report.contains("  --> res/values/styles.xml:7\n"));
    assert!(report.contains("while linking `app:style/Broken`"));

    for unresolved in linker.unresolved_references().diagnostics() {
        let report = reporter.render(&unresolved).to_string();
        assert!(report.contains("resource `app:attr/undeclared` not found"));
    }

    assert_eq!(2, reporter.error_count());

    // Ids were still assigned.
    let id = linker
        .table()
        .find(&name("style/Broken")?)
        .map(|entry| entry.id())
        .unwrap_or(ResourceId::UNSET);
    assert!(id.is_valid());

    Ok(())
}
