use std::collections::{BTreeSet, HashMap, HashSet};

use crate::generator::ast::{
  Annotation, ClassName, CodeBlock, FunSpec, KotlinFile, PropertySpec, TypeKind, TypeName, TypeSpec,
};

/// Decides, per file, which classes are imported and which must be written qualified.
///
/// A simple name is imported for the first class that claims it. Later classes sharing
/// the simple name, and classes shadowed by a type declared in the file itself, are
/// written with their canonical name.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImportSet {
  package: String,
  imported: BTreeSet<ClassName>,
  simple_names: HashMap<String, ClassName>,
  declared: HashSet<String>,
}

impl ImportSet {
  pub(crate) fn collect(file: &KotlinFile) -> Self {
    let mut declared = HashSet::new();
    collect_declared(&file.type_spec, &mut declared);

    let mut referenced = vec![];
    visit_type_spec(&file.type_spec, &mut referenced);

    let mut set = Self {
      package: file.package.clone(),
      declared,
      ..Self::default()
    };

    for class in referenced {
      set.claim(class);
    }
    set
  }

  fn claim(&mut self, class: ClassName) {
    if self.declared.contains(&class.simple) || self.simple_names.contains_key(&class.simple) {
      return;
    }
    if !class.is_implicitly_imported() && class.package != self.package {
      self.imported.insert(class.clone());
    }
    self.simple_names.insert(class.simple.clone(), class);
  }

  pub(crate) fn imports(&self) -> impl Iterator<Item = &ClassName> {
    self.imported.iter()
  }

  /// How `class` is spelled in this file.
  pub(crate) fn name_of(&self, class: &ClassName) -> String {
    let visible_as_simple = if self.declared.contains(&class.simple) {
      class.package == self.package
    } else {
      self.simple_names.get(&class.simple) == Some(class)
    };

    if visible_as_simple {
      class.simple.clone()
    } else {
      class.canonical()
    }
  }
}

fn collect_declared(spec: &TypeSpec, declared: &mut HashSet<String>) {
  if spec.kind != TypeKind::CompanionObject {
    declared.insert(spec.name.clone());
  }
  if let Some(companion) = &spec.companion {
    collect_declared(companion, declared);
  }
}

fn visit_type_spec(spec: &TypeSpec, out: &mut Vec<ClassName>) {
  spec.annotations.iter().for_each(|annotation| visit_annotation(annotation, out));
  spec
    .constructor_properties
    .iter()
    .for_each(|property| visit_property(property, out));
  if let Some(superclass) = &spec.superclass {
    visit_type(superclass, out);
  }
  spec.superinterfaces.iter().for_each(|interface| visit_type(interface, out));
  for constant in &spec.enum_constants {
    constant.args.iter().for_each(|arg| visit_code(arg, out));
  }
  spec.properties.iter().for_each(|property| visit_property(property, out));
  spec.functions.iter().for_each(|function| visit_function(function, out));
  if let Some(companion) = &spec.companion {
    visit_type_spec(companion, out);
  }
}

fn visit_property(property: &PropertySpec, out: &mut Vec<ClassName>) {
  property
    .annotations
    .iter()
    .for_each(|annotation| visit_annotation(annotation, out));
  visit_type(&property.type_name, out);
  if let Some(initializer) = &property.initializer {
    visit_code(initializer, out);
  }
}

fn visit_function(function: &FunSpec, out: &mut Vec<ClassName>) {
  function
    .annotations
    .iter()
    .for_each(|annotation| visit_annotation(annotation, out));
  for param in &function.params {
    visit_type(&param.type_name, out);
    if let Some(default) = &param.default {
      visit_code(default, out);
    }
  }
  if let Some(returns) = &function.returns {
    visit_type(returns, out);
  }
  for statement in function.body.iter().flatten() {
    visit_code(statement, out);
  }
}

fn visit_annotation(annotation: &Annotation, out: &mut Vec<ClassName>) {
  out.push(annotation.class.clone());
  annotation.args.iter().for_each(|arg| visit_code(arg, out));
}

fn visit_code(code: &CodeBlock, out: &mut Vec<ClassName>) {
  code.types.iter().for_each(|type_name| visit_type(type_name, out));
}

fn visit_type(type_name: &TypeName, out: &mut Vec<ClassName>) {
  out.extend(type_name.classes().into_iter().cloned());
}
