//! Build script to embed Windows resource metadata into executables
//! This sets the application name shown in Task Manager

fn main() {
    #[cfg(windows)]
    {
        let target = std::env::var("CARGO_BIN_NAME").unwrap_or_default();

        let mut res = winresource::WindowsResource::new();

        res.set("ProductName", "Wosea Clock");
        res.set("CompanyName", "Wosea");
        res.set("LegalCopyright", "Copyright © 2026");
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));

        match target.as_str() {
            "wosea_clock" => {
                res.set("FileDescription", "Wosea.Clock");
                res.set("InternalName", "Wosea.Clock");
                res.set("OriginalFilename", "wosea_clock.exe");
            }
            "wosea_launcher" => {
                res.set("FileDescription", "Wosea.Launcher");
                res.set("InternalName", "Wosea.Launcher");
                res.set("OriginalFilename", "wosea_launcher.exe");
            }
            _ => {
                res.set("FileDescription", "Wosea Clock");
                res.set("InternalName", "WoseaClock");
            }
        }

        if let Err(e) = res.compile() {
            println!("cargo:warning=Failed to compile Windows resources: {}", e);
        }
    }
}
