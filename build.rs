fn main() {
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "Rusty Fit");
        res.set("FileDescription", "Least-squares curve fitting");
        res.compile().expect("Failed to compile Windows resources");
    }
}
