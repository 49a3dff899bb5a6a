//! `info` command: print a face's attributes and, if a pixel size was
//! requested, the scaled size metrics the driver reports for it.

use crate::cli::InfoArgs;
use anyhow::{bail, Context, Result};
use fontcore_cli::Engine;

pub fn run(args: &InfoArgs) -> Result<()> {
    let data = std::fs::read(&args.font_file)
        .with_context(|| format!("reading {}", args.font_file.display()))?;
    let engine = Engine::new().context("initializing rendering engine")?;
    let mut face = engine
        .open_face(&data, args.face_index)
        .context("opening face")?;

    let attrs = face.attrs();
    println!("driver:        {}", face.driver_name());
    println!("glyphs:        {}", attrs.num_glyphs);
    println!("units_per_em:  {}", attrs.units_per_em);
    println!("ascender:      {}", attrs.ascender);
    println!("descender:     {}", attrs.descender);
    println!("char_maps:     {}", face.charmaps().len());

    if let Some(ppem) = args.ppem {
        engine
            .size_face(&mut face, ppem)
            .with_context(|| format!("requesting {ppem}px size"))?;
        let Some(size) = face.active_size() else {
            bail!("size_face reported success but left no active size");
        };
        let metrics = &size.metrics;
        println!();
        println!("ppem:          {}x{}", metrics.x_ppem, metrics.y_ppem);
        println!("height:        {}", metrics.height);
        println!("max_advance:   {}", metrics.max_advance);
    }

    Ok(())
}
