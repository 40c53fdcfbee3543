pub trait Entity {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}
