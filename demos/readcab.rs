use anyhow::Context;

use std::env;

fn main() -> anyhow::Result<()> {
    let num_args = env::args().count();
    if num_args != 2 {
        println!("Usage: readcab <path/to/archive.cab>");
        return Ok(());
    }

    let input_path = env::args().nth(1).unwrap();
    let cabinet = cabinet_index::open(&input_path)
        .with_context(|| format!("Failed to read cabinet {}", input_path))?;
    let (major, minor) = cabinet.version();
    println!("Version {}.{}, {} bytes", major, minor, cabinet.total_size());
    println!(
        "Set {:#06x}, index {}",
        cabinet.cabinet_set_id(),
        cabinet.cabinet_set_index()
    );
    if let Some(prev) = cabinet.prev_cabinet() {
        println!("Previous: {} on {:?}", prev.cabinet_name(), prev.disk_name());
    }
    if let Some(next) = cabinet.next_cabinet() {
        println!("Next: {} on {:?}", next.cabinet_name(), next.disk_name());
    }
    for (index, folder) in cabinet.folder_entries().enumerate() {
        println!("Folder #{}:", index);
        println!("  compression_type = {:?}", folder.compression_type());
        println!("  num_data_blocks = {}", folder.num_data_blocks());
        let mut total_size = 0u64;
        for file in folder.file_entries() {
            let size = file.uncompressed_size();
            println!("  {:?} ({} bytes)", file.name(), size);
            total_size += size as u64;
        }
        println!("  {} bytes total", total_size);
    }
    cabinet.close();

    Ok(())
}
