use std::io::{self, Write};

use itertools::Itertools;

use crate::classifier::Classifier;

const INDENT: &str = "    ";

/// Writes a line-oriented rendering of `classifier`.
///
/// Classes appear in registration order, followed by the dependency edges in discovery order and
/// the evaluation order. Classes on a dependency cycle are marked with `*` in the last line.
pub fn dump_classifier(classifier: &Classifier, mut out: impl Write) -> io::Result<()> {
    for (id, class) in classifier.iter() {
        if class.is_hidden() {
            write!(out, "hidden ")?;
        }

        write!(out, "class {}", class.name())?;

        if let Some(superclass) = classifier.superclass_of(id) {
            write!(out, " : {}", superclass.name())?;
        }

        writeln!(out)?;

        for variable in class.variables().iter() {
            writeln!(out, "{}var {}", INDENT, variable)?;
        }

        for (name, value) in class.constants().iter() {
            writeln!(out, "{}const {} = {}", INDENT, name, value)?;
        }

        for constraint in class.constraints() {
            writeln!(out, "{}{}", INDENT, constraint)?;
        }
    }

    writeln!(out, "dependencies")?;

    for dependency in classifier.dependencies() {
        writeln!(out, "{}{}", INDENT, dependency)?;
    }

    let layout = classifier.layout();
    let order = layout
        .order()
        .iter()
        .map(|&id| match layout.is_cyclic(id) {
            true => format!("{}*", classifier[id].name()),
            false => classifier[id].name().to_owned(),
        })
        .join(" ");

    match order.is_empty() {
        true => writeln!(out, "order"),
        false => writeln!(out, "order {}", order),
    }
}

/// Renders `classifier` into a string.
pub fn dump_to_string(classifier: &Classifier) -> String {
    let mut buf = vec![];
    dump_classifier(classifier, &mut buf).expect("writing to a Vec<u8> does not fail");

    String::from_utf8(buf).expect("the dump consists of valid UTF-8 strings")
}
