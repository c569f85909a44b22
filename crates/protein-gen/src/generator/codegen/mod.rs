mod imports;
mod kotlin;

pub(crate) use kotlin::render_file;
