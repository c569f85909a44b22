use std::fmt::Write as _;

use super::imports::ImportSet;
use crate::generator::{
  ast::{
    Annotation, CodeBlock, EnumConstant, FunSpec, KotlinFile, Modifier, ParameterSpec, PropertySpec, TypeKind,
    TypeName, TypeSpec,
  },
  naming::identifiers::kotlin_identifier,
};

const INDENT: &str = "    ";
const INLINE_ANNOTATION_WIDTH: usize = 100;

pub(crate) const FILE_HEADER: &str = "// Generated by protein-gen. DO NOT EDIT.";

/// Renders a [`KotlinFile`] to source text.
pub(crate) fn render_file(file: &KotlinFile) -> String {
  let imports = ImportSet::collect(file);
  let renderer = KotlinRenderer { imports: &imports };

  let mut out = String::new();
  out.push_str(FILE_HEADER);
  out.push_str("\n\n");
  if !file.package.is_empty() {
    let _ = writeln!(out, "package {}\n", file.package);
  }

  let mut has_imports = false;
  for class in imports.imports() {
    let _ = writeln!(out, "import {}", class.canonical());
    has_imports = true;
  }
  if has_imports {
    out.push('\n');
  }

  renderer.write_type(&mut out, &file.type_spec, 0);
  out.push('\n');
  out
}

struct KotlinRenderer<'a> {
  imports: &'a ImportSet,
}

impl KotlinRenderer<'_> {
  fn type_name(&self, type_name: &TypeName) -> String {
    let mut rendered = self.imports.name_of(&type_name.class);
    if !type_name.args.is_empty() {
      let args: Vec<String> = type_name.args.iter().map(|arg| self.type_name(arg)).collect();
      let _ = write!(rendered, "<{}>", args.join(", "));
    }
    if type_name.nullable {
      rendered.push('?');
    }
    rendered
  }

  fn code(&self, code: &CodeBlock) -> String {
    let mut rendered = String::with_capacity(code.format.len());
    let mut types = code.types.iter();
    let mut pieces = code.format.split(CodeBlock::TYPE_PLACEHOLDER).peekable();
    while let Some(piece) = pieces.next() {
      rendered.push_str(piece);
      if pieces.peek().is_some() {
        match types.next() {
          Some(type_name) => rendered.push_str(&self.type_name(type_name)),
          None => rendered.push_str(CodeBlock::TYPE_PLACEHOLDER),
        }
      }
    }
    rendered
  }

  fn annotation(&self, annotation: &Annotation, level: usize) -> String {
    let name = format!("@{}", self.imports.name_of(&annotation.class));
    if annotation.args.is_empty() {
      return name;
    }

    let args: Vec<String> = annotation.args.iter().map(|arg| self.code(arg)).collect();
    let inline = format!("{name}({})", args.join(", "));
    if args.len() == 1 && !inline.contains('\n') && inline.len() <= INLINE_ANNOTATION_WIDTH {
      return inline;
    }

    let inner = indent(level + 1);
    let body = args
      .iter()
      .map(|arg| format!("{inner}{}", reindent(arg, &inner)))
      .collect::<Vec<_>>()
      .join(",\n");
    format!("{name}(\n{body}\n{})", indent(level))
  }

  fn write_annotations(&self, out: &mut String, annotations: &[Annotation], level: usize) {
    for annotation in annotations {
      let _ = writeln!(out, "{}{}", indent(level), self.annotation(annotation, level));
    }
  }

  fn property_declaration(&self, property: &PropertySpec) -> String {
    let mut declaration = modifiers(&property.modifiers);
    declaration.push_str(if property.mutable { "var " } else { "val " });
    let _ = write!(
      declaration,
      "{}: {}",
      kotlin_identifier(&property.name),
      self.type_name(&property.type_name)
    );
    if let Some(initializer) = &property.initializer {
      let _ = write!(declaration, " = {}", self.code(initializer));
    }
    declaration
  }

  fn write_property(&self, out: &mut String, property: &PropertySpec, level: usize) {
    self.write_annotations(out, &property.annotations, level);
    let pad = indent(level);
    let _ = write!(out, "{pad}{}", reindent(&self.property_declaration(property), &pad));
  }

  fn parameter(&self, param: &ParameterSpec) -> String {
    let mut rendered = format!("{}: {}", kotlin_identifier(&param.name), self.type_name(&param.type_name));
    if let Some(default) = &param.default {
      let _ = write!(rendered, " = {}", self.code(default));
    }
    rendered
  }

  fn write_function(&self, out: &mut String, function: &FunSpec, level: usize) {
    self.write_annotations(out, &function.annotations, level);
    let pad = indent(level);
    let params: Vec<String> = function.params.iter().map(|param| self.parameter(param)).collect();
    let _ = write!(
      out,
      "{pad}{}fun {}({})",
      modifiers(&function.modifiers),
      kotlin_identifier(&function.name),
      params.join(", ")
    );
    if let Some(returns) = &function.returns {
      let _ = write!(out, ": {}", self.type_name(returns));
    }

    match &function.body {
      None => out.push('\n'),
      Some(statements) => {
        out.push_str(" {\n");
        let inner = indent(level + 1);
        for statement in statements {
          let _ = writeln!(out, "{inner}{}", reindent(&self.code(statement), &inner));
        }
        let _ = writeln!(out, "{pad}}}");
      }
    }
  }

  fn write_enum_constants(&self, out: &mut String, constants: &[EnumConstant], level: usize) {
    let pad = indent(level);
    let rendered: Vec<String> = constants
      .iter()
      .map(|constant| {
        if constant.args.is_empty() {
          format!("{pad}{}", constant.name)
        } else {
          let args: Vec<String> = constant.args.iter().map(|arg| self.code(arg)).collect();
          format!("{pad}{}({})", constant.name, args.join(", "))
        }
      })
      .collect();
    let _ = writeln!(out, "{};", rendered.join(",\n"));
  }

  fn write_type(&self, out: &mut String, spec: &TypeSpec, level: usize) {
    let pad = indent(level);
    if let Some(kdoc) = &spec.kdoc {
      let _ = writeln!(out, "{pad}/**");
      for line in kdoc.lines() {
        let _ = writeln!(out, "{pad} * {line}");
      }
      let _ = writeln!(out, "{pad} */");
    }
    self.write_annotations(out, &spec.annotations, level);

    let kind = match spec.kind {
      TypeKind::DataClass if spec.constructor_properties.is_empty() => TypeKind::Class,
      kind => kind,
    };
    let _ = write!(out, "{pad}{}", kind.keyword());
    if kind != TypeKind::CompanionObject {
      let _ = write!(out, " {}", spec.name);
    }

    if !spec.constructor_properties.is_empty() {
      out.push_str("(\n");
      let last = spec.constructor_properties.len() - 1;
      for (index, property) in spec.constructor_properties.iter().enumerate() {
        self.write_property(out, property, level + 1);
        out.push_str(if index == last { "\n" } else { ",\n" });
      }
      let _ = write!(out, "{pad})");
    }

    let mut supertypes: Vec<String> = vec![];
    if let Some(superclass) = &spec.superclass {
      supertypes.push(format!("{}()", self.type_name(superclass)));
    }
    supertypes.extend(spec.superinterfaces.iter().map(|interface| self.type_name(interface)));
    if !supertypes.is_empty() {
      let _ = write!(out, " : {}", supertypes.join(", "));
    }

    if !spec.has_body() {
      return;
    }

    out.push_str(" {\n");
    let inner = level + 1;
    let mut sections = 0;

    if !spec.enum_constants.is_empty() {
      self.write_enum_constants(out, &spec.enum_constants, inner);
      sections += 1;
    }

    if !spec.properties.is_empty() {
      if sections > 0 {
        out.push('\n');
      }
      for property in &spec.properties {
        self.write_property(out, property, inner);
        out.push('\n');
      }
      sections += 1;
    }

    for function in &spec.functions {
      if sections > 0 {
        out.push('\n');
      }
      self.write_function(out, function, inner);
      sections += 1;
    }

    if let Some(companion) = &spec.companion {
      if sections > 0 {
        out.push('\n');
      }
      self.write_type(out, companion, inner);
      out.push('\n');
    }

    let _ = write!(out, "{pad}}}");
  }
}

fn indent(level: usize) -> String {
  INDENT.repeat(level)
}

/// Indents every line after the first with `pad`, for multi-line fragments.
fn reindent(text: &str, pad: &str) -> String {
  text.replace('\n', &format!("\n{pad}"))
}

fn modifiers(modifiers: &[Modifier]) -> String {
  modifiers.iter().map(|modifier| format!("{modifier} ")).collect()
}
