//! Command implementations. Each one works on a [`Workspace`] and returns
//! what the binary prints; none of them save.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use sdcard_model::{Sequence, SequenceId, StackId};
use sdcard_query::{Query, parse_query};
use sdcard_session::{Distribution, Stack};

use crate::workspace::Workspace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub files: Vec<(PathBuf, usize)>,
    pub added: usize,
}

pub fn import(workspace: &mut Workspace, files: &[PathBuf]) -> Result<ImportReport> {
    let mut report = ImportReport {
        files: Vec::new(),
        added: 0,
    };
    for path in files {
        let span = info_span!("import", path = %path.display());
        let _guard = span.enter();
        let added = workspace
            .library
            .import_file(path)
            .with_context(|| format!("import {}", path.display()))?;
        report.files.push((path.clone(), added));
        report.added += added;
    }
    Ok(report)
}

fn query_or_everything(workspace: &Workspace, text: Option<&str>) -> Result<Query> {
    match text {
        Some(text) => parse_query(text, workspace.library.catalog())
            .with_context(|| format!("parse query {text:?}")),
        None => Ok(Query::default()),
    }
}

/// Sequences matching `query`, in import order.
pub fn list<'a>(workspace: &'a Workspace, query: Option<&str>) -> Result<Vec<&'a Sequence>> {
    let query = query_or_everything(workspace, query)?;
    Ok(workspace
        .library
        .sequences()
        .filter(|sequence| query.pass(sequence))
        .collect())
}

pub fn show<'a>(workspace: &'a Workspace, id: &str) -> Result<&'a Sequence> {
    Ok(workspace.library.resolve(id)?)
}

fn resolve_ids(workspace: &Workspace, ids: &[String]) -> Result<Vec<SequenceId>> {
    ids.iter()
        .map(|id| -> Result<SequenceId> { Ok(workspace.library.resolve(id)?.id.clone()) })
        .collect()
}

/// Adds or removes a tag on several sequences. Returns how many were edited.
pub fn tag(workspace: &mut Workspace, ids: &[String], tag: &str, add: bool) -> Result<usize> {
    let tag = workspace.library.tag_by_name(tag)?.id.clone();
    let ids = resolve_ids(workspace, ids)?;
    for id in &ids {
        if add {
            workspace.library.add_tag(id, &tag)?;
        } else {
            workspace.library.remove_tag(id, &tag)?;
        }
    }
    Ok(ids.len())
}

/// Sets (or with `None`, clears) a category choice on several sequences.
pub fn categorize(
    workspace: &mut Workspace,
    ids: &[String],
    category: &str,
    option: Option<&str>,
) -> Result<usize> {
    let category = workspace.library.category_by_name(category)?.id.clone();
    let ids = resolve_ids(workspace, ids)?;
    for id in &ids {
        match option {
            Some(option) => workspace.library.set_option(id, &category, option)?,
            None => workspace.library.clear_option(id, &category)?,
        }
    }
    Ok(ids.len())
}

/// Deletes sequences from the library and from any running session.
pub fn remove(workspace: &mut Workspace, ids: &[String]) -> Result<usize> {
    let ids = resolve_ids(workspace, ids)?;
    for id in &ids {
        workspace.library.remove_sequence(id);
    }
    let library = &workspace.library;
    workspace
        .session
        .retain_sequences(|id| library.sequence(id).is_some());
    Ok(ids.len())
}

pub fn define_tag(workspace: &mut Workspace, name: &str, comment: &str) -> Result<()> {
    workspace.library.define_tag(name, comment)?;
    Ok(())
}

pub fn define_category(
    workspace: &mut Workspace,
    name: &str,
    options: &[String],
    comment: &str,
) -> Result<()> {
    if options.is_empty() {
        bail!("category {name} needs at least one option");
    }
    let options = options.iter().map(|option| option.trim().to_lowercase()).collect();
    workspace.library.define_category(name, options, comment)?;
    Ok(())
}

fn stack_id(workspace: &Workspace, name: &str) -> Result<StackId> {
    workspace
        .session
        .stack_by_name(name)
        .map(|stack| stack.id.clone())
        .ok_or_else(|| anyhow!("no stack named {name}"))
}

pub fn stack_add(workspace: &mut Workspace, name: &str, query: Option<&str>) -> Result<StackId> {
    if workspace.session.stack_by_name(name).is_some() {
        bail!("a stack named {name} already exists");
    }
    let query = query_or_everything(workspace, query)?;
    Ok(workspace.session.add_stack(name.trim(), query))
}

pub fn stack_remove(workspace: &mut Workspace, name: &str) -> Result<()> {
    let id = stack_id(workspace, name)?;
    workspace.session.remove_stack(&id);
    Ok(())
}

pub fn stack_rename(workspace: &mut Workspace, name: &str, new_name: &str) -> Result<()> {
    if workspace.session.stack_by_name(new_name).is_some() {
        bail!("a stack named {new_name} already exists");
    }
    let id = stack_id(workspace, name)?;
    workspace.session.rename_stack(&id, new_name.trim());
    Ok(())
}

pub fn stack_query(workspace: &mut Workspace, name: &str, query: Option<&str>) -> Result<()> {
    let id = stack_id(workspace, name)?;
    let query = query_or_everything(workspace, query)?;
    workspace.session.set_query(&id, query);
    Ok(())
}

/// Fills every stack from the library.
///
/// `balanced` and `auto_tag` override the settings when given.
pub fn session_start(
    workspace: &mut Workspace,
    balanced: bool,
    auto_tag: Option<&str>,
) -> Result<()> {
    if workspace.session.stacks().next().is_none() {
        workspace.session.add_stack("all", Query::default());
        info!("no stacks defined, created one for every sequence");
    }
    let auto_tag = auto_tag.or(workspace.settings.auto_tag.as_deref());
    workspace.session.auto_tag = match auto_tag {
        Some(name) => Some(
            workspace
                .library
                .tag_by_name(name)
                .with_context(|| format!("auto tag {name}"))?
                .id
                .clone(),
        ),
        None => None,
    };
    workspace.session.distribution = if balanced {
        Distribution::Balanced
    } else {
        workspace.settings.distribution
    };
    let Workspace {
        library, session, ..
    } = workspace;
    session.init(library.sequences());
    Ok(())
}

/// The stack a navigation command applies to: the named one, else the
/// active one.
fn target_stack(workspace: &Workspace, name: Option<&str>) -> Result<StackId> {
    match name {
        Some(name) => stack_id(workspace, name),
        None => workspace
            .session
            .active()
            .map(|stack| stack.id.clone())
            .ok_or_else(|| anyhow!("no stacks defined")),
    }
}

/// Advances a stack, tagging the sequence left behind when auto tag is on.
pub fn next(workspace: &mut Workspace, stack: Option<&str>) -> Result<Option<SequenceId>> {
    let id = target_stack(workspace, stack)?;
    let Workspace {
        library, session, ..
    } = workspace;
    Ok(session.advance(&id, |sequence, tag| {
        if let Err(error) = library.add_tag(sequence, tag) {
            warn!(sequence = %sequence, %error, "auto tag failed");
        }
    }))
}

pub fn prev(workspace: &mut Workspace, stack: Option<&str>) -> Result<Option<SequenceId>> {
    let id = target_stack(workspace, stack)?;
    Ok(workspace.session.push_to(&id))
}

pub fn stop(workspace: &mut Workspace) {
    workspace.session.stop();
}

/// One row of `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackStatus {
    pub name: String,
    pub query: String,
    pub position: usize,
    pub len: usize,
    pub active: bool,
    pub top: Option<SequenceId>,
}

pub fn status(workspace: &Workspace) -> Vec<StackStatus> {
    let active = workspace.session.active().map(|stack| stack.id.clone());
    workspace
        .session
        .stacks()
        .map(|stack: &Stack| StackStatus {
            name: stack.name.clone(),
            query: stack.query.to_string(),
            position: stack.index,
            len: stack.len(),
            active: active.as_ref() == Some(&stack.id),
            top: stack.top().cloned(),
        })
        .collect()
}

/// Writes the settings in effect to `path`.
pub fn write_settings(workspace: &Workspace, path: &Path) -> Result<()> {
    sdcard_store::settings::save_settings_to(&workspace.settings, path)
        .with_context(|| format!("write settings {}", path.display()))
}
