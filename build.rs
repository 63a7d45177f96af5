use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src");

    // Delete a stale log file if one exists
    if Path::new("crmbox.log").exists() {
        if fs::remove_file("crmbox.log").is_ok() {
            println!("cargo:warning=Deleted crmbox.log");
        }
    }
}
