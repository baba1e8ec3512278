fn main() -> std::process::ExitCode {
    flowtag_lib::run()
}
