fn main() {
    fps_arena::game::run();
}
