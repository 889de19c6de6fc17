//! Module headers, exposing lists, and imports
//!
//! Exposing lists support `(..)` (which carries its own range, so tooling
//! can point at it) and explicit comma-separated lists, with nested `(..)`
//! or constructor lists for union types.

use crate::fern::ast::module::{
    DefaultModuleData, EffectModuleData, ExposedConstructors, Exposing, Import, ModuleHeader,
    TopLevelExpose,
};
use crate::fern::ast::range::Ranged;
use crate::fern::combinators::{
    between, choice, fail, maybe, pair, ranged, sep_by1, succeed, token, Parser,
};
use crate::fern::lexing::{function_name, keyword, operator_token, type_name};

use super::common::{module_path, ranged_upper_name, separator};
use super::layout::{maybe_lax_spacing, maybe_spacing, spacing};

pub fn module_header() -> Parser<Ranged<ModuleHeader>> {
    ranged(choice(vec![
        port_module(),
        effect_module(),
        normal_module(),
    ]))
}

fn normal_module() -> Parser<ModuleHeader> {
    keyword("module")
        .keep(spacing())
        .keep(module_data())
        .map(ModuleHeader::Normal)
}

fn port_module() -> Parser<ModuleHeader> {
    keyword("port")
        .keep(spacing())
        .keep(keyword("module"))
        .keep(spacing())
        .keep(module_data())
        .map(ModuleHeader::Port)
}

fn module_data() -> Parser<DefaultModuleData> {
    pair(
        ranged(module_path()),
        spacing()
            .keep(keyword("exposing"))
            .keep(maybe_spacing())
            .keep(exposing_list()),
    )
    .map(|(name, exposing)| DefaultModuleData { name, exposing })
}

fn effect_module() -> Parser<ModuleHeader> {
    keyword("effect")
        .keep(spacing())
        .keep(keyword("module"))
        .keep(spacing())
        .keep(pair(
            ranged(module_path()),
            pair(
                spacing()
                    .keep(keyword("where"))
                    .keep(spacing())
                    .keep(where_block()),
                spacing()
                    .keep(keyword("exposing"))
                    .keep(maybe_spacing())
                    .keep(exposing_list()),
            ),
        ))
        .map(|(name, ((command, subscription), exposing))| {
            ModuleHeader::Effect(EffectModuleData {
                name,
                command,
                subscription,
                exposing,
            })
        })
}

/// `{ command = MyCmd, subscription = MySub }` with both fields optional.
fn where_block() -> Parser<(Option<Ranged<String>>, Option<Ranged<String>>)> {
    token("{")
        .keep(maybe_lax_spacing())
        .keep(sep_by1(separator(","), where_field()))
        .skip(maybe_lax_spacing())
        .skip(token("}"))
        .map(|fields| {
            let mut command = None;
            let mut subscription = None;
            for (kind, name) in fields {
                match kind.as_str() {
                    "command" => command = Some(name),
                    _ => subscription = Some(name),
                }
            }
            (command, subscription)
        })
}

fn where_field() -> Parser<(String, Ranged<String>)> {
    pair(function_name(), separator("=").keep(ranged_upper_name())).and_then(|(kind, name)| {
        if kind == "command" || kind == "subscription" {
            succeed((kind, name))
        } else {
            fail("expected `command` or `subscription`")
        }
    })
}

pub fn exposing_list() -> Parser<Ranged<Exposing>> {
    ranged(
        token("(")
            .keep(maybe_lax_spacing())
            .keep(expose_all().or(explicit_exposing()))
            .skip(maybe_lax_spacing())
            .skip(token(")")),
    )
}

fn expose_all() -> Parser<Exposing> {
    ranged(token("..")).map(|dots| Exposing::All(dots.range))
}

fn explicit_exposing() -> Parser<Exposing> {
    sep_by1(separator(","), ranged(expose_item())).map(Exposing::Explicit)
}

fn expose_item() -> Parser<TopLevelExpose> {
    choice(vec![
        function_name().map(TopLevelExpose::Function),
        between(token("("), token(")"), operator_token()).map(TopLevelExpose::Operator),
        type_expose(),
    ])
}

fn type_expose() -> Parser<TopLevelExpose> {
    pair(
        type_name(),
        maybe(maybe_lax_spacing().keep(exposed_constructors())),
    )
    .map(|(name, constructors)| match constructors {
        Some(found) => TopLevelExpose::TypeExpose {
            name,
            constructors: Some(found),
        },
        None => TopLevelExpose::TypeOrAlias(name),
    })
}

fn exposed_constructors() -> Parser<ExposedConstructors> {
    let all = ranged(token("..")).map(|dots| ExposedConstructors::All(dots.range));
    let explicit =
        sep_by1(separator(","), ranged_upper_name()).map(ExposedConstructors::Explicit);
    token("(")
        .keep(maybe_lax_spacing())
        .keep(all.or(explicit))
        .skip(maybe_lax_spacing())
        .skip(token(")"))
}

pub fn import_statement() -> Parser<Import> {
    keyword("import")
        .keep(spacing())
        .keep(pair(
            ranged(module_path()),
            pair(
                maybe(
                    spacing()
                        .keep(keyword("as"))
                        .keep(spacing())
                        .keep(ranged_upper_name()),
                ),
                maybe(
                    spacing()
                        .keep(keyword("exposing"))
                        .keep(maybe_spacing())
                        .keep(exposing_list()),
                ),
            ),
        ))
        .map(|(module_name, (alias, exposing))| Import {
            module_name,
            alias,
            exposing,
        })
}
