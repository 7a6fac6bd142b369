use bevy::app::AppExit;

fn main() -> AppExit {
    match flappy_bird::game::run() {
        Ok(exit) => exit,
        Err(err) => {
            eprintln!("flappy-bird: {err}");
            AppExit::error()
        }
    }
}
