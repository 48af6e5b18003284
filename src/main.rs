fn main() {
    ware::run_cli();
}
